use eyre::Result;

use splicekit_core_rs::num::Count;

pub use calculator::Calculator;
pub use error::PsiError;
pub use groups::{Configuration, FixedGroups, PerEventGroups};
pub use matrix::{CountMatrix, PsiMatrix};
pub use reads::MinReads;

mod calculator;
pub mod coverage;
mod error;
mod groups;
mod matrix;
mod reads;

/// PSI for column groups shared by all rows, evaluated on the calling thread.
pub fn psi_fixed<C: Count>(
    matrix: &CountMatrix<C>,
    groups: &FixedGroups,
    min_reads: MinReads,
) -> Result<PsiMatrix> {
    let mut calculator = Calculator::new();
    calculator.set_min_reads(min_reads);
    calculator.fixed(matrix, groups)
}

/// PSI for column groups given per row, evaluated on the calling thread.
pub fn psi_per_event<C: Count>(
    matrix: &CountMatrix<C>,
    groups: &PerEventGroups,
    min_reads: MinReads,
) -> Result<PsiMatrix> {
    let mut calculator = Calculator::new();
    calculator.set_min_reads(min_reads);
    calculator.per_event(matrix, groups)
}
