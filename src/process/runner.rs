//! Process execution

use super::command::{CommandSpec, OutputMode, resolve_executable};
use crate::exceptions::{GauntletError, Result};
use log::{debug, info};
use std::process::{Command, ExitStatus, Stdio};

/// Result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Process exit code; -1 when the child was killed by a signal
    pub exit_code: i32,
    /// Captured output, only present in capture mode
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl CommandOutcome {
    /// Outcome of a streamed command
    pub fn streamed(exit_code: i32) -> Self {
        Self {
            exit_code,
            stdout: None,
            stderr: None,
        }
    }
}

/// Launches commands and waits for them
///
/// Implementations only fail when the command cannot be launched; exit
/// status policy lives in [`run_cmd`].
pub trait CommandRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandOutcome>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        (**self).execute(spec)
    }
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn build(spec: &CommandSpec) -> Command {
        let resolved = resolve_executable(&spec.program);
        let mut command = Command::new(&resolved);
        command.args(&spec.args);

        // Inherit the parent environment and layer the overlay on top
        for (key, value) in &spec.env {
            debug!("🌍 Setting env: {}={}", key, value);
            command.env(key, value);
        }

        if let Some(ref dir) = spec.current_dir {
            command.current_dir(dir);
        }

        command
    }
}

impl CommandRunner for SystemRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        let mut command = Self::build(spec);
        let spawn_error = |source: std::io::Error| GauntletError::Spawn {
            command: spec.display(),
            source,
        };

        match spec.output {
            OutputMode::Stream => {
                if spec.discard_stderr {
                    command.stderr(Stdio::null());
                }
                let status = command.status().map_err(spawn_error)?;
                Ok(CommandOutcome::streamed(exit_code_of(status)))
            }
            OutputMode::Capture => {
                command.stdin(Stdio::null());
                let output = command.output().map_err(spawn_error)?;
                Ok(CommandOutcome {
                    exit_code: exit_code_of(output.status),
                    stdout: Some(String::from_utf8_lossy(&output.stdout).into_owned()),
                    stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
                })
            }
        }
    }
}

fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Run a command and apply its error policy
///
/// With `throw_on_error` set (the default) any exit code other than 0 is
/// returned as [`GauntletError::CommandFailed`], carrying captured output
/// when there is some.
pub fn run_cmd<R: CommandRunner + ?Sized>(runner: &R, spec: &CommandSpec) -> Result<CommandOutcome> {
    if spec.print_cmd {
        info!("### Executing cmd: {}", spec.display());
    } else {
        debug!("🏃 Running: {}", spec.display());
    }

    let outcome = runner.execute(spec)?;

    if spec.throw_on_error && outcome.exit_code != 0 {
        return Err(GauntletError::CommandFailed {
            command: spec.display(),
            exit_code: outcome.exit_code,
            stdout: outcome.stdout,
            stderr: outcome.stderr,
        });
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh").args(["-c", script]).print_cmd(false)
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_returns_normally_in_both_modes() {
        let streamed = run_cmd(&SystemRunner, &sh("exit 0")).unwrap();
        assert_eq!(streamed, CommandOutcome::streamed(0));

        let captured = run_cmd(&SystemRunner, &sh("echo hello; echo oops >&2").capture()).unwrap();
        assert_eq!(captured.exit_code, 0);
        assert_eq!(captured.stdout.as_deref(), Some("hello\n"));
        assert_eq!(captured.stderr.as_deref(), Some("oops\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_raises_with_exact_code() {
        for code in [1, 3, 42, 255] {
            let err = run_cmd(&SystemRunner, &sh(&format!("exit {code}"))).unwrap_err();
            match err {
                GauntletError::CommandFailed {
                    exit_code, stdout, ..
                } => {
                    assert_eq!(exit_code, code);
                    assert!(stdout.is_none());
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_captured_failure_carries_output() {
        let err = run_cmd(&SystemRunner, &sh("echo partial; echo broken >&2; exit 4").capture())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Non-zero exitcode: 4"));
        assert!(msg.contains("partial"));
        assert!(msg.contains("broken"));
    }

    #[cfg(unix)]
    #[test]
    fn test_opting_out_returns_outcome() {
        let outcome = run_cmd(&SystemRunner, &sh("exit 5").throw_on_error(false)).unwrap();
        assert_eq!(outcome.exit_code, 5);
        assert!(outcome.stdout.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_discarded_stderr_still_succeeds_when_streamed() {
        let spec = sh("echo noise >&2; exit 0").discard_stderr();
        assert_eq!(spec.output, OutputMode::Stream);
        let outcome = run_cmd(&SystemRunner, &spec).unwrap();
        assert_eq!(outcome, CommandOutcome::streamed(0));

        let err = run_cmd(&SystemRunner, &sh("echo noise >&2; exit 3").discard_stderr())
            .unwrap_err();
        assert_eq!(err.command_exit_code(), Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_env_overlay_and_cwd() {
        let dir = tempfile::TempDir::new().unwrap();
        let spec = sh("printf '%s:%s' \"$GAUNTLET_TEST_VALUE\" \"$(pwd -P)\"")
            .env("GAUNTLET_TEST_VALUE", "overlay")
            .current_dir(dir.path())
            .capture();
        let outcome = run_cmd(&SystemRunner, &spec).unwrap();
        let stdout = outcome.stdout.unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        assert_eq!(stdout, format!("overlay:{}", canonical.display()));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let spec = CommandSpec::new("definitely-not-a-real-tool-4821").print_cmd(false);
        let err = run_cmd(&SystemRunner, &spec).unwrap_err();
        assert!(matches!(err, GauntletError::Spawn { .. }));
    }
}
