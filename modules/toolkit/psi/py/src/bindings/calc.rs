use eyre::Result;
use pyo3::prelude::*;

use splicekit_core_rs::parallelism;
use splicekit_psi_rs::{Calculator, CountMatrix, FixedGroups, MinReads, PerEventGroups};

use super::error::into_pyerr;

fn calculator(min_reads: i64, threads: isize) -> Result<Calculator> {
    let mut calculator = Calculator::new();
    calculator.set_min_reads(MinReads::new(min_reads)?);
    if parallelism::available(threads)? > 1 {
        calculator.set_thread_pool(parallelism::pool(threads)?);
    }
    Ok(calculator)
}

/// PSI for column groups shared by all rows of `mat` (a list of rows).
///
/// Configuration `k` pools columns `inc_a[k]`, `inc_b[k]` against `exc_a[k]`, `exc_b[k]`
/// and yields output column `k`. `None` marks an absent junction. Indices are 0-based.
#[pyfunction]
#[pyo3(
    name = "psiFastCalc",
    signature = (mat, inc_a, inc_b, exc_a, exc_b, min_reads = 10, threads = 1)
)]
#[allow(clippy::too_many_arguments)]
pub fn psi_fast_calc(
    py: Python<'_>,
    mat: Vec<Vec<f64>>,
    inc_a: Vec<Option<usize>>,
    inc_b: Vec<Option<usize>>,
    exc_a: Vec<Option<usize>>,
    exc_b: Vec<Option<usize>>,
    min_reads: i64,
    threads: isize,
) -> PyResult<Vec<Vec<Option<f64>>>> {
    py.allow_threads(|| -> Result<_> {
        let calculator = calculator(min_reads, threads)?;
        let matrix = CountMatrix::from_rows(&mat)?;
        let groups = FixedGroups::new(inc_a, inc_b, exc_a, exc_b)?;
        Ok(calculator.fixed(&matrix, &groups)?.into_rows())
    })
    .map_err(into_pyerr)
}

/// PSI for column groups given per row of `mat`: `inc[i]` and `exc[i]` list the columns of
/// row `i`. Returns a single-column table.
#[pyfunction]
#[pyo3(
    name = "psiFastCalc2",
    signature = (mat, inc, exc, min_reads = 10, threads = 1)
)]
pub fn psi_fast_calc2(
    py: Python<'_>,
    mat: Vec<Vec<f64>>,
    inc: Vec<Vec<usize>>,
    exc: Vec<Vec<usize>>,
    min_reads: i64,
    threads: isize,
) -> PyResult<Vec<Vec<Option<f64>>>> {
    py.allow_threads(|| -> Result<_> {
        let calculator = calculator(min_reads, threads)?;
        let matrix = CountMatrix::from_rows(&mat)?;
        let groups = PerEventGroups::new(inc, exc)?;
        Ok(calculator.per_event(&matrix, &groups)?.into_rows())
    })
    .map_err(into_pyerr)
}
