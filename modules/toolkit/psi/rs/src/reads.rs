use eyre::Result;

use crate::error::PsiError;

/// Minimum total read support (inclusion + exclusion) required to report a ratio.
///
/// Anything below the threshold is reported as missing. Zero-total events are always missing,
/// even when the threshold itself is zero.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct MinReads(u64);

impl Default for MinReads {
    fn default() -> Self {
        MinReads(10)
    }
}

impl MinReads {
    pub fn new(value: i64) -> Result<Self> {
        match u64::try_from(value) {
            Ok(value) => Ok(MinReads(value)),
            Err(_) => Err(PsiError::InvalidThreshold { value }.into()),
        }
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Percent spliced-in for the given evidence or `None` when there is not enough of it.
    #[inline]
    pub fn ratio(&self, inclusion: f64, exclusion: f64) -> Option<f64> {
        // Negative sums can only come from malformed counts and would leave [0, 1]
        if inclusion < 0.0 || exclusion < 0.0 {
            return None;
        }

        // NaN or infinite counts, as well as overflowing sums, give a non-finite total
        let total = inclusion + exclusion;
        if total.is_finite() && total > 0.0 && total >= self.0 as f64 {
            Some(inclusion / total)
        } else {
            None
        }
    }
}

impl TryFrom<i64> for MinReads {
    type Error = eyre::Report;

    fn try_from(value: i64) -> Result<Self> {
        MinReads::new(value)
    }
}
