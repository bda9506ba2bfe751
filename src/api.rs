//! High-level API used by the gauntlet binaries

use crate::exceptions::Result;
use crate::pipeline::{self, PythonLayout, RunTestsConfig};
use crate::process::SystemRunner;
use std::path::{Path, PathBuf};

/// Options for the Python pipeline
#[derive(Debug, Default)]
pub struct PythonTestOptions {
    /// JSON layout file overriding the default repository layout
    pub layout_path: Option<PathBuf>,
    /// Home directory used to expand `~` in cache paths
    pub home: Option<PathBuf>,
}

/// Run the top-level pipeline with real processes
pub fn run_all_tests(config: &RunTestsConfig) -> Result<()> {
    pipeline::run_tests(config, &SystemRunner)
}

/// Run the Python pipeline with real processes
pub fn run_python_tests(root_dir: &Path, options: PythonTestOptions) -> Result<()> {
    let layout = match options.layout_path {
        Some(ref path) => PythonLayout::load(path)?,
        None => PythonLayout::default(),
    };
    pipeline::run_python_pipeline(root_dir, options.home, layout, &SystemRunner)
}

/// Default location of the Python runner: next to the running executable
pub fn default_python_runner() -> PathBuf {
    let name = format!("gauntlet-python-tests{}", std::env::consts::EXE_SUFFIX);
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(&name)))
        .unwrap_or_else(|| PathBuf::from(name))
}
