use derive_more::{Display, Error};
use eyre::Report;

/// Failures raised by the PSI toolkit. They are returned wrapped in an [`eyre::Report`];
/// use [`PsiError::of`] to recover the kind.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
pub enum PsiError {
    #[display("{what} index {index} is out of range (length {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    #[display("Shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[display("Minimum read support must be non-negative, got {value}")]
    InvalidThreshold { value: i64 },
}

impl PsiError {
    pub fn of(report: &Report) -> Option<&PsiError> {
        report.downcast_ref::<PsiError>()
    }

    pub(crate) fn index(what: &'static str, index: usize, len: usize) -> Result<(), Report> {
        if index < len {
            Ok(())
        } else {
            Err(PsiError::IndexOutOfRange { what, index, len }.into())
        }
    }

    pub(crate) fn shape(what: &'static str, expected: usize, actual: usize) -> Result<(), Report> {
        if expected == actual {
            Ok(())
        } else {
            Err(PsiError::ShapeMismatch {
                what,
                expected,
                actual,
            }
            .into())
        }
    }
}
