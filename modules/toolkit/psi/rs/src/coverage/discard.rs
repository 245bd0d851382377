use ahash::AHashSet;
use eyre::Result;
use itertools::Itertools;

use crate::coverage::EventTable;
use crate::error::PsiError;
use crate::matrix::PsiMatrix;

/// Quality categories that invalidate a PSI value. Membership is exact string equality.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DiscardSet(AHashSet<String>);

impl DiscardSet {
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(labels.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for DiscardSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

fn describe(discard: &DiscardSet) -> String {
    discard.iter().sorted().join(", ")
}

/// Mask every row whose quality category (column `quality_col` of `events`) is discarded.
/// All PSI columns of a masked row become missing, other rows are copied unchanged.
pub fn discard(
    psi: &PsiMatrix,
    events: &EventTable,
    quality_col: usize,
    discard: &DiscardSet,
) -> Result<PsiMatrix> {
    let quality = events.column(quality_col)?;
    PsiError::shape("event table rows", psi.nrows(), events.nrows())?;
    if discard.is_empty() {
        log::warn!("Empty set of quality scores to discard, PSI values are kept as is");
    }

    let mut result = psi.clone();
    let mut masked = 0;
    for (row, category) in quality.iter().enumerate() {
        if discard.contains(category) {
            result.mask_row(row);
            masked += 1;
        }
    }

    log::debug!(
        "Discarded {masked} of {} events with quality in [{}]",
        psi.nrows(),
        describe(discard)
    );
    Ok(result)
}

/// Mask PSI values using one quality column per sample: PSI column `j` is checked against
/// column `first_quality_col + j` of `events`, as laid out in VAST-TOOLS inclusion tables.
/// The first quality column must exist even when `psi` has no columns.
pub fn discard_per_sample(
    psi: &PsiMatrix,
    events: &EventTable,
    first_quality_col: usize,
    discard: &DiscardSet,
) -> Result<PsiMatrix> {
    events.column(first_quality_col)?;
    let end = first_quality_col
        .checked_add(psi.ncols())
        .ok_or(PsiError::IndexOutOfRange {
            what: "event table column",
            index: usize::MAX,
            len: events.ncols(),
        })?;
    let quality = (first_quality_col..end)
        .map(|ind| events.column(ind))
        .collect::<Result<Vec<_>>>()?;
    PsiError::shape("event table rows", psi.nrows(), events.nrows())?;

    let mut result = psi.clone();
    let mut masked = 0;
    for (col, quality) in quality.into_iter().enumerate() {
        for (row, category) in quality.iter().enumerate() {
            if discard.contains(category) {
                result.mask(row, col);
                masked += 1;
            }
        }
    }

    log::debug!(
        "Discarded {masked} of {} PSI values with quality in [{}]",
        psi.nrows() * psi.ncols(),
        describe(discard)
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn psi() -> PsiMatrix {
        PsiMatrix::from_rows([
            [Some(0.1), Some(0.9)],
            [Some(0.2), None],
            [Some(0.3), Some(0.7)],
            [Some(0.4), Some(0.6)],
        ])
        .unwrap()
    }

    #[test]
    fn test_discard_set() {
        let set: DiscardSet = ["N", "VLOW", "N"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("VLOW"));
        assert!(!set.contains("vlow"));
        assert!(!set.contains("N,N,N"));
        assert_eq!(describe(&set), "N, VLOW");
    }

    #[test]
    fn test_discard_rows() -> Result<()> {
        let events = EventTable::from_columns([
            vec!["ev1", "ev2", "ev3", "ev4"],
            vec!["OK", "N", "OK", "VLOW"],
        ])?;
        let set = DiscardSet::new(["N", "VLOW"]);

        let result = discard(&psi(), &events, 1, &set)?;
        assert_eq!(
            result.into_rows(),
            vec![
                vec![Some(0.1), Some(0.9)],
                vec![None, None],
                vec![Some(0.3), Some(0.7)],
                vec![None, None],
            ]
        );

        // Nothing to discard
        assert_eq!(discard(&psi(), &events, 1, &DiscardSet::default())?, psi());
        assert_eq!(discard(&psi(), &events, 0, &set)?, psi());
        Ok(())
    }

    #[test]
    fn test_discard_is_idempotent() -> Result<()> {
        let events = EventTable::from_columns([["LOW", "N", "SOK", "OK"]])?;
        let set = DiscardSet::new(["N", "LOW"]);

        let once = discard(&psi(), &events, 0, &set)?;
        let twice = discard(&once, &events, 0, &set)?;
        assert_eq!(once, twice);
        assert_eq!(once.missing(), 4);
        Ok(())
    }

    #[test]
    fn test_discard_errors() -> Result<()> {
        let set = DiscardSet::new(["N"]);

        let events = EventTable::from_columns([["OK", "N", "OK", "OK"]])?;
        let err = discard(&psi(), &events, 1, &set).unwrap_err();
        assert!(matches!(
            PsiError::of(&err),
            Some(PsiError::IndexOutOfRange { index: 1, len: 1, .. })
        ));

        let events = EventTable::from_columns([["OK", "N", "OK"]])?;
        let err = discard(&psi(), &events, 0, &set).unwrap_err();
        assert_eq!(
            PsiError::of(&err),
            Some(&PsiError::ShapeMismatch {
                what: "event table rows",
                expected: 4,
                actual: 3
            })
        );
        Ok(())
    }

    #[test]
    fn test_discard_per_sample() -> Result<()> {
        let events = EventTable::from_columns([
            vec!["ev1", "ev2", "ev3", "ev4"],
            vec!["OK", "N", "VLOW", "OK"],
            vec!["N", "OK", "OK", "LOW"],
        ])?;
        let set = DiscardSet::new(["N", "VLOW"]);

        let result = discard_per_sample(&psi(), &events, 1, &set)?;
        assert_eq!(
            result.into_rows(),
            vec![
                vec![Some(0.1), None],
                vec![None, None],
                vec![None, Some(0.7)],
                vec![Some(0.4), Some(0.6)],
            ]
        );

        // The second sample would need a fourth column
        let err = discard_per_sample(&psi(), &events, 2, &set).unwrap_err();
        assert!(matches!(
            PsiError::of(&err),
            Some(PsiError::IndexOutOfRange { index: 3, len: 3, .. })
        ));

        let err = discard_per_sample(&psi(), &events, usize::MAX, &set).unwrap_err();
        assert!(matches!(
            PsiError::of(&err),
            Some(PsiError::IndexOutOfRange { len: 3, .. })
        ));

        // Rows must stay aligned with the event table
        let short = EventTable::from_columns([vec!["N", "OK", "OK"], vec!["OK", "OK", "N"]])?;
        let err = discard_per_sample(&psi(), &short, 0, &set).unwrap_err();
        assert_eq!(
            PsiError::of(&err),
            Some(&PsiError::ShapeMismatch {
                what: "event table rows",
                expected: 4,
                actual: 3
            })
        );
        Ok(())
    }

    #[test]
    fn test_discard_per_sample_without_psi_columns() -> Result<()> {
        let psi = PsiMatrix::new(2, 0, vec![])?;
        let events = EventTable::from_columns([["N", "OK"]])?;
        let set = DiscardSet::new(["N"]);

        assert_eq!(discard_per_sample(&psi, &events, 0, &set)?, psi);

        let err = discard_per_sample(&psi, &events, 1, &set).unwrap_err();
        assert_eq!(
            PsiError::of(&err),
            Some(&PsiError::IndexOutOfRange {
                what: "event table column",
                index: 1,
                len: 1
            })
        );
        Ok(())
    }
}
