use pyo3::prelude::*;

pub const __VERSION__: &str = env!("CARGO_PKG_VERSION");

#[pymodule]
pub fn _splicekit(py: Python, module: &Bound<'_, PyModule>) -> PyResult<()> {
    let sysmod = py.import("sys")?.getattr("modules")?;
    let name = module.name()?.extract::<String>()?;

    // Toolkit
    let path = format!("{name}.toolkit");
    let toolkit = PyModule::new(py, "toolkit")?;
    splicekit_psi_py::register(&path, &toolkit, &sysmod)?;
    module.add_submodule(&toolkit)?;
    sysmod.set_item(path.as_str(), &toolkit)?;

    // Constants
    module.add("__version__", __VERSION__)?;

    // Add the module to sys.modules cache
    sysmod.set_item(name, module)?;

    Ok(())
}
