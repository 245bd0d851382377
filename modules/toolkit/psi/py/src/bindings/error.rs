use eyre::Report;
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::PyErr;

use splicekit_psi_rs::PsiError;

pub fn into_pyerr(report: Report) -> PyErr {
    match PsiError::of(&report).cloned() {
        Some(err @ PsiError::IndexOutOfRange { .. }) => PyIndexError::new_err(err.to_string()),
        Some(err) => PyValueError::new_err(err.to_string()),
        None => PyErr::from(report),
    }
}
