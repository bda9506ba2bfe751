//! Error types for gauntlet

use std::fmt;

/// Main error type for pipeline operations
#[derive(Debug)]
pub enum GauntletError {
    /// An external command exited with a non-zero status
    CommandFailed {
        command: String,
        exit_code: i32,
        stdout: Option<String>,
        stderr: Option<String>,
    },

    /// An external command could not be launched at all
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// A named pipeline stage failed
    StageFailed {
        stage: String,
        source: Box<GauntletError>,
    },

    /// Version declaration file did not contain a quoted version
    VersionParse(String),

    /// Invalid configuration
    Config(String),

    /// IO error
    Io(std::io::Error),

    /// JSON parsing error
    Json(serde_json::Error),
}

impl GauntletError {
    /// Exit code of the failing command, looking through stage wrappers
    pub fn command_exit_code(&self) -> Option<i32> {
        match self {
            GauntletError::CommandFailed { exit_code, .. } => Some(*exit_code),
            GauntletError::StageFailed { source, .. } => source.command_exit_code(),
            _ => None,
        }
    }
}

impl fmt::Display for GauntletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GauntletError::CommandFailed {
                exit_code,
                stdout,
                stderr,
                ..
            } => {
                write!(f, "Non-zero exitcode: {exit_code}")?;
                if stdout.is_some() || stderr.is_some() {
                    write!(
                        f,
                        "\n\nSTDOUT:\n{}\n\nSTDERR:\n{}",
                        stdout.as_deref().unwrap_or(""),
                        stderr.as_deref().unwrap_or("")
                    )?;
                }
                Ok(())
            }
            GauntletError::Spawn { command, source } => {
                write!(f, "Failed to launch '{command}': {source}")
            }
            GauntletError::StageFailed { stage, source } => {
                write!(f, "Stage '{stage}' failed: {source}")
            }
            GauntletError::VersionParse(msg) => write!(f, "Version parse error: {msg}"),
            GauntletError::Config(msg) => write!(f, "Configuration error: {msg}"),
            GauntletError::Io(err) => write!(f, "IO error: {err}"),
            GauntletError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for GauntletError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GauntletError::Spawn { source, .. } => Some(source),
            GauntletError::StageFailed { source, .. } => Some(source.as_ref()),
            GauntletError::Io(err) => Some(err),
            GauntletError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GauntletError {
    fn from(err: std::io::Error) -> Self {
        GauntletError::Io(err)
    }
}

impl From<serde_json::Error> for GauntletError {
    fn from(err: serde_json::Error) -> Self {
        GauntletError::Json(err)
    }
}

/// Result type for gauntlet operations
pub type Result<T> = std::result::Result<T, GauntletError>;
