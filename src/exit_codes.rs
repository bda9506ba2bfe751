//! Standard exit codes for gauntlet binaries
//!
//! Both runners use these so a CI log shows which kind of failure ended the
//! pipeline.

use crate::exceptions::GauntletError;

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Panic or unrecoverable error
pub const EXIT_PANIC: i32 = 101;

/// An external command exited with a non-zero status
pub const EXIT_COMMAND_FAILED: i32 = 102;

/// Invalid command-line arguments
pub const EXIT_INVALID_ARGS: i32 = 105;

/// I/O error (file not found, permission denied, disk error)
pub const EXIT_IO_ERROR: i32 = 106;

/// Configuration error (bad layout file, unparseable version file)
pub const EXIT_CONFIG_ERROR: i32 = 109;

/// Dependency error (required tool could not be launched)
pub const EXIT_DEPENDENCY_ERROR: i32 = 110;

/// Map an error to the exit code a binary should terminate with
pub fn exit_code_for(error: &GauntletError) -> i32 {
    match error {
        GauntletError::CommandFailed { .. } => EXIT_COMMAND_FAILED,
        GauntletError::Spawn { .. } => EXIT_DEPENDENCY_ERROR,
        GauntletError::StageFailed { source, .. } => exit_code_for(source),
        GauntletError::VersionParse(_) | GauntletError::Config(_) | GauntletError::Json(_) => {
            EXIT_CONFIG_ERROR
        }
        GauntletError::Io(_) => EXIT_IO_ERROR,
    }
}
