//! Gauntlet - sequential build, test and packaging verification pipeline
//!
//! Runs the build tool's test suite, then a Python pipeline that publishes a
//! local artifact, style-checks the sources, submits every Python test file
//! and round-trips the Python distribution through build, install and a smoke
//! test. Stages run strictly in order and the first failure ends the run.

// Enforce strict code quality and reliability
#![deny(
    // Safety
    unsafe_code,

    // Correctness
    missing_debug_implementations,
    unreachable_pub,

    // Future compatibility
    future_incompatible,

    // Rust 2018 idioms
    rust_2018_idioms,

    // All warnings must be fixed
    warnings,
)]
#![warn(
    // Documentation
    missing_docs,

    // Error handling best practices
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unimplemented,
    clippy::todo,

    // Code clarity and maintainability
    clippy::cognitive_complexity,
    clippy::type_complexity,

    // Best practices
    clippy::clone_on_ref_ptr,
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::if_not_else,
    clippy::needless_continue,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
)]
#![allow(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod api;
pub mod artifact;
pub mod discovery;
pub mod exceptions;
pub mod exit_codes;
pub mod logger;
pub mod pipeline;
pub mod process;
pub mod stages;
pub mod utils;
pub mod version;

pub use api::{PythonTestOptions, default_python_runner, run_all_tests, run_python_tests};
pub use exceptions::{GauntletError, Result};
pub use pipeline::{PythonLayout, RunTestsConfig};
pub use process::{CommandOutcome, CommandRunner, CommandSpec, SystemRunner, run_cmd};
