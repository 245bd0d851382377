use derive_getters::{Dissolve, Getters};
use eyre::Result;

use crate::error::PsiError;

/// Inclusion/exclusion junctions of a single event configuration: primary and optional secondary
/// column for each side. Absent columns contribute zero reads.
pub type Configuration = ([Option<usize>; 2], [Option<usize>; 2]);

/// Column groups shared by every row of the count matrix.
///
/// The four sequences are read position-wise: configuration `k` pools columns
/// `inc_a[k]`, `inc_b[k]` as inclusion evidence and `exc_a[k]`, `exc_b[k]` as exclusion evidence.
/// Each configuration becomes one column of the output.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Dissolve, Getters)]
pub struct FixedGroups {
    inc_a: Vec<Option<usize>>,
    inc_b: Vec<Option<usize>>,
    exc_a: Vec<Option<usize>>,
    exc_b: Vec<Option<usize>>,
}

impl FixedGroups {
    pub fn new(
        inc_a: Vec<Option<usize>>,
        inc_b: Vec<Option<usize>>,
        exc_a: Vec<Option<usize>>,
        exc_b: Vec<Option<usize>>,
    ) -> Result<Self> {
        let expected = inc_a.len();
        PsiError::shape("inc_b configurations", expected, inc_b.len())?;
        PsiError::shape("exc_a configurations", expected, exc_a.len())?;
        PsiError::shape("exc_b configurations", expected, exc_b.len())?;

        Ok(Self {
            inc_a,
            inc_b,
            exc_a,
            exc_b,
        })
    }

    /// Groups where every configuration has all four junctions.
    pub fn from_indices(
        inc_a: Vec<usize>,
        inc_b: Vec<usize>,
        exc_a: Vec<usize>,
        exc_b: Vec<usize>,
    ) -> Result<Self> {
        let wrap = |x: Vec<usize>| -> Vec<Option<usize>> { x.into_iter().map(Some).collect() };
        Self::new(wrap(inc_a), wrap(inc_b), wrap(exc_a), wrap(exc_b))
    }

    /// Number of configurations, i.e. output columns.
    pub fn len(&self) -> usize {
        self.inc_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inc_a.is_empty()
    }

    pub fn configuration(&self, ind: usize) -> Configuration {
        (
            [self.inc_a[ind], self.inc_b[ind]],
            [self.exc_a[ind], self.exc_b[ind]],
        )
    }

    pub fn configurations(&self) -> impl ExactSizeIterator<Item = Configuration> + '_ {
        (0..self.len()).map(|ind| self.configuration(ind))
    }

    /// Ensure that every referenced column exists in a matrix with `ncols` columns.
    pub fn validate(&self, ncols: usize) -> Result<()> {
        for column in [&self.inc_a, &self.inc_b, &self.exc_a, &self.exc_b]
            .into_iter()
            .flatten()
            .flatten()
        {
            PsiError::index("column", *column, ncols)?;
        }
        Ok(())
    }
}

/// Column groups given separately for each row of the count matrix.
/// Lists may have any length, an empty list sums to zero reads.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Dissolve, Getters)]
pub struct PerEventGroups {
    inc: Vec<Vec<usize>>,
    exc: Vec<Vec<usize>>,
}

impl PerEventGroups {
    pub fn new(inc: Vec<Vec<usize>>, exc: Vec<Vec<usize>>) -> Result<Self> {
        PsiError::shape("exclusion groups", inc.len(), exc.len())?;
        Ok(Self { inc, exc })
    }

    /// Number of events described by the groups.
    pub fn len(&self) -> usize {
        self.inc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inc.is_empty()
    }

    pub fn event(&self, ind: usize) -> (&[usize], &[usize]) {
        (&self.inc[ind], &self.exc[ind])
    }

    /// Ensure that the groups describe exactly `nrows` events and reference existing columns only.
    pub fn validate(&self, nrows: usize, ncols: usize) -> Result<()> {
        PsiError::shape("per-event groups", nrows, self.len())?;
        for column in self.inc.iter().chain(self.exc.iter()).flatten() {
            PsiError::index("column", *column, ncols)?;
        }
        Ok(())
    }
}
