use eyre::Result;
use pyo3::prelude::*;

use splicekit_psi_rs::coverage::{self, DiscardSet, EventTable};
use splicekit_psi_rs::PsiMatrix;

use super::error::into_pyerr;

fn discard(
    psi: &[Vec<Option<f64>>],
    event_data: Vec<Vec<String>>,
    quality_col: usize,
    scores_to_discard: Vec<String>,
    per_sample: bool,
) -> Result<PsiMatrix> {
    let psi = PsiMatrix::from_rows(psi)?;
    let events = EventTable::new(event_data)?;
    let discard = DiscardSet::new(scores_to_discard);

    if per_sample {
        coverage::discard_per_sample(&psi, &events, quality_col, &discard)
    } else {
        coverage::discard(&psi, &events, quality_col, &discard)
    }
}

/// Replace PSI values with `None` where the event quality is one of `scores_to_discard`.
///
/// `psi` is a list of rows, `event_data` a list of columns of the same length. By default the
/// whole row is masked using column `quality_col`; with `per_sample` PSI column `j` is checked
/// against column `quality_col + j`.
#[pyfunction]
#[pyo3(
    name = "discardVastToolsByCvg",
    signature = (psi, event_data, quality_col, scores_to_discard, per_sample = false)
)]
pub fn discard_vast_tools_by_cvg(
    psi: Vec<Vec<Option<f64>>>,
    event_data: Vec<Vec<String>>,
    quality_col: usize,
    scores_to_discard: Vec<String>,
    per_sample: bool,
) -> PyResult<Vec<Vec<Option<f64>>>> {
    discard(&psi, event_data, quality_col, scores_to_discard, per_sample)
        .map(PsiMatrix::into_rows)
        .map_err(into_pyerr)
}
