//! The verification pipelines
//!
//! `run_tests` is the top-level runner; it hands off to the Python pipeline
//! in `python` through a separate executable.

pub mod layout;
pub mod python;

#[cfg(test)]
mod test_support;

pub use layout::PythonLayout;
pub use python::{PythonPipeline, python_stages, run_python_pipeline};
pub use run_tests::{RunTestsConfig, build_test_command, python_tests_enabled, run_tests};
