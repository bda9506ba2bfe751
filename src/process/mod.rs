//! External command execution
//!
//! Every pipeline stage goes through [`run_cmd`]; nothing else spawns
//! processes.

pub mod command;
pub mod runner;

pub use command::{CommandSpec, OutputMode, resolve_executable};
pub use runner::{CommandOutcome, CommandRunner, SystemRunner, run_cmd};
