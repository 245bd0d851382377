use derive_getters::Dissolve;
use eyre::Result;

use splicekit_core_rs::num::Count;

use crate::error::PsiError;

fn flatten<T: Clone>(
    what: &'static str,
    rows: impl IntoIterator<Item = impl AsRef<[T]>>,
) -> Result<(usize, usize, Vec<T>)> {
    let mut values = Vec::new();
    let mut nrows = 0;
    let mut ncols = None;
    for row in rows {
        let row = row.as_ref();
        let expected = *ncols.get_or_insert(row.len());
        PsiError::shape(what, expected, row.len())?;

        values.extend_from_slice(row);
        nrows += 1;
    }
    Ok((nrows, ncols.unwrap_or(0), values))
}

fn cells(what: &'static str, nrows: usize, ncols: usize, actual: usize) -> Result<()> {
    match nrows.checked_mul(ncols) {
        Some(expected) => PsiError::shape(what, expected, actual),
        None => Err(PsiError::ShapeMismatch {
            what,
            expected: usize::MAX,
            actual,
        }
        .into()),
    }
}

/// Dense row-major table of read counts. Rows are evaluated independently, columns hold the
/// counts referenced by inclusion/exclusion groups.
#[derive(Clone, PartialEq, Debug, Default, Dissolve)]
pub struct CountMatrix<C: Count> {
    nrows: usize,
    ncols: usize,
    values: Vec<C>,
}

impl<C: Count> CountMatrix<C> {
    pub fn new(nrows: usize, ncols: usize, values: Vec<C>) -> Result<Self> {
        cells("count matrix values", nrows, ncols, values.len())?;
        Ok(Self {
            nrows,
            ncols,
            values,
        })
    }

    /// Build the matrix from rows of equal length.
    pub fn from_rows(rows: impl IntoIterator<Item = impl AsRef<[C]>>) -> Result<Self> {
        let (nrows, ncols, values) = flatten("count matrix row length", rows)?;
        Ok(Self {
            nrows,
            ncols,
            values,
        })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn row(&self, row: usize) -> &[C] {
        &self.values[row * self.ncols..(row + 1) * self.ncols]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[C]> + '_ {
        (0..self.nrows).map(|row| self.row(row))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<C> {
        if row < self.nrows && col < self.ncols {
            Some(self.values[row * self.ncols + col])
        } else {
            None
        }
    }
}

/// Row-major table of ratios, `None` marks a missing value.
#[derive(Clone, PartialEq, Debug, Default, Dissolve)]
pub struct PsiMatrix {
    nrows: usize,
    ncols: usize,
    values: Vec<Option<f64>>,
}

impl PsiMatrix {
    pub fn new(nrows: usize, ncols: usize, values: Vec<Option<f64>>) -> Result<Self> {
        cells("psi matrix values", nrows, ncols, values.len())?;
        Ok(Self {
            nrows,
            ncols,
            values,
        })
    }

    pub fn from_rows(rows: impl IntoIterator<Item = impl AsRef<[Option<f64>]>>) -> Result<Self> {
        let (nrows, ncols, values) = flatten("psi matrix row length", rows)?;
        Ok(Self {
            nrows,
            ncols,
            values,
        })
    }

    /// Build the matrix from host values where NaN stands for a missing value.
    pub fn from_sentinel(nrows: usize, ncols: usize, values: Vec<f64>) -> Result<Self> {
        let values = values
            .into_iter()
            .map(|x| if x.is_nan() { None } else { Some(x) })
            .collect();
        Self::new(nrows, ncols, values)
    }

    /// Row-major host values, missing cells become NaN.
    pub fn to_sentinel(&self) -> Vec<f64> {
        self.values.iter().map(|x| x.unwrap_or(f64::NAN)).collect()
    }

    pub(crate) fn missing_filled(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            values: vec![None; nrows * ncols],
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn row(&self, row: usize) -> &[Option<f64>] {
        &self.values[row * self.ncols..(row + 1) * self.ncols]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Option<f64>]> + '_ {
        (0..self.nrows).map(|row| self.row(row))
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values.iter().skip(col).step_by(self.ncols.max(1)).copied()
    }

    /// Value of the cell, `None` for both missing and out-of-bounds cells.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.nrows && col < self.ncols {
            self.values[row * self.ncols + col]
        } else {
            None
        }
    }

    /// Number of missing cells.
    pub fn missing(&self) -> usize {
        self.values.iter().filter(|x| x.is_none()).count()
    }

    pub fn into_rows(self) -> Vec<Vec<Option<f64>>> {
        if self.ncols == 0 {
            return vec![Vec::new(); self.nrows];
        }
        self.values
            .chunks_exact(self.ncols)
            .map(|row| row.to_vec())
            .collect()
    }

    pub(crate) fn values_mut(&mut self) -> &mut [Option<f64>] {
        &mut self.values
    }

    pub(crate) fn mask(&mut self, row: usize, col: usize) {
        self.values[row * self.ncols + col] = None;
    }

    pub(crate) fn mask_row(&mut self, row: usize) {
        self.values[row * self.ncols..(row + 1) * self.ncols].fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_matrix_layout() -> Result<()> {
        let matrix = CountMatrix::from_rows([[3u32, 2, 1, 0], [7, 0, 0, 1]])?;
        assert_eq!((matrix.nrows(), matrix.ncols()), (2, 4));
        assert_eq!(matrix.row(1), &[7, 0, 0, 1]);
        assert_eq!(matrix.get(0, 1), Some(2));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.get(0, 4), None);
        assert_eq!(matrix.rows().len(), 2);

        assert_eq!(CountMatrix::new(2, 4, matrix.clone().dissolve().2)?, matrix);
        Ok(())
    }

    #[test]
    fn test_count_matrix_shape_errors() {
        let err = CountMatrix::new(2, 2, vec![1u32, 2, 3]).unwrap_err();
        assert_eq!(
            PsiError::of(&err),
            Some(&PsiError::ShapeMismatch {
                what: "count matrix values",
                expected: 4,
                actual: 3
            })
        );

        let err = CountMatrix::from_rows(vec![vec![1u32, 2], vec![3]]).unwrap_err();
        assert!(matches!(
            PsiError::of(&err),
            Some(PsiError::ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_overflowing_shapes() {
        for (nrows, ncols) in [(usize::MAX, 2), (2, usize::MAX), (usize::MAX, usize::MAX)] {
            let err = CountMatrix::<u32>::new(nrows, ncols, vec![1, 2]).unwrap_err();
            assert_eq!(
                PsiError::of(&err),
                Some(&PsiError::ShapeMismatch {
                    what: "count matrix values",
                    expected: usize::MAX,
                    actual: 2
                })
            );

            let err = PsiMatrix::from_sentinel(nrows, ncols, vec![0.5]).unwrap_err();
            assert!(matches!(
                PsiError::of(&err),
                Some(PsiError::ShapeMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_degenerate_shapes() -> Result<()> {
        let empty = CountMatrix::from_rows(Vec::<Vec<f64>>::new())?;
        assert_eq!((empty.nrows(), empty.ncols()), (0, 0));

        let no_columns = CountMatrix::<u32>::new(3, 0, vec![])?;
        assert_eq!(no_columns.rows().map(|x| x.len()).sum::<usize>(), 0);
        assert_eq!(no_columns.rows().len(), 3);

        let psi = PsiMatrix::missing_filled(2, 0);
        assert_eq!(psi.into_rows(), vec![Vec::<Option<f64>>::new(); 2]);
        Ok(())
    }

    #[test]
    fn test_psi_matrix_access() -> Result<()> {
        let mut psi = PsiMatrix::from_rows([
            [Some(0.5), None],
            [Some(1.0), Some(0.0)],
            [None, Some(0.25)],
        ])?;
        assert_eq!(psi.missing(), 2);
        assert_eq!(
            psi.column(1).collect::<Vec<_>>(),
            vec![None, Some(0.0), Some(0.25)]
        );
        assert_eq!(psi.get(2, 1), Some(0.25));
        assert_eq!(psi.get(3, 0), None);

        psi.mask(1, 0);
        psi.mask_row(2);
        assert_eq!(
            psi.clone().into_rows(),
            vec![
                vec![Some(0.5), None],
                vec![None, Some(0.0)],
                vec![None, None]
            ]
        );
        assert_eq!(psi.missing(), 4);
        Ok(())
    }

    #[test]
    fn test_sentinel_conversion() -> Result<()> {
        let psi = PsiMatrix::from_sentinel(2, 2, vec![0.5, f64::NAN, 1.0, 0.0])?;
        assert_eq!(psi.row(0), &[Some(0.5), None]);
        assert_eq!(psi.row(1), &[Some(1.0), Some(0.0)]);

        let host = psi.to_sentinel();
        assert_eq!(host[0], 0.5);
        assert!(host[1].is_nan());
        assert_eq!(&host[2..], &[1.0, 0.0]);

        assert!(PsiMatrix::from_sentinel(1, 2, vec![0.5]).is_err());
        Ok(())
    }
}
