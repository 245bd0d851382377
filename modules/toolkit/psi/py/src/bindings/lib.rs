use pyo3::prelude::*;

pub use calc::{psi_fast_calc, psi_fast_calc2};
pub use coverage::discard_vast_tools_by_cvg;

mod calc;
mod coverage;
mod error;

/// Host-visible names of the exported routines.
pub const ROUTINES: [&str; 3] = ["psiFastCalc", "psiFastCalc2", "discardVastToolsByCvg"];

pub fn register<'b>(
    path: &str,
    parent: &Bound<'b, PyModule>,
    sysmod: &Bound<PyAny>,
) -> PyResult<Bound<'b, PyModule>> {
    let name = "psi";
    let path = format!("{}.{}", path, name);
    let module = PyModule::new(parent.py(), name)?;

    module.add_function(wrap_pyfunction!(calc::psi_fast_calc, &module)?)?;
    module.add_function(wrap_pyfunction!(calc::psi_fast_calc2, &module)?)?;
    module.add_function(wrap_pyfunction!(
        coverage::discard_vast_tools_by_cvg,
        &module
    )?)?;
    module.add("__all__", ROUTINES.to_vec())?;

    parent.add_submodule(&module)?;
    sysmod.set_item(path, &module)?;

    Ok(module)
}
