//! Command description and executable resolution

use log::debug;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// How a child's stdout/stderr are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Child writes straight to our terminal
    Stream,
    /// Child output is piped and returned in the outcome
    Capture,
}

/// A single external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Applied on top of the inherited environment
    pub env: BTreeMap<String, String>,
    pub current_dir: Option<PathBuf>,
    pub output: OutputMode,
    pub throw_on_error: bool,
    pub print_cmd: bool,
    /// Stream mode only: send child stderr to the null device
    pub discard_stderr: bool,
}

impl CommandSpec {
    /// Describe a command; streams output and raises on failure by default
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            current_dir: None,
            output: OutputMode::Stream,
            throw_on_error: true,
            print_cmd: true,
            discard_stderr: false,
        }
    }

    /// Command whose program is a filesystem path
    pub fn from_path(program: &Path) -> Self {
        Self::new(program.to_string_lossy())
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    pub fn env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn current_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn capture(mut self) -> Self {
        self.output = OutputMode::Capture;
        self
    }

    pub fn throw_on_error(mut self, throw: bool) -> Self {
        self.throw_on_error = throw;
        self
    }

    pub fn print_cmd(mut self, print: bool) -> Self {
        self.print_cmd = print;
        self
    }

    pub fn discard_stderr(mut self) -> Self {
        self.discard_stderr = true;
        self
    }

    /// Space-joined command line, for logs and error messages
    pub fn display(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Resolve executable path using PATH environment variable
///
/// Programs given as a path (anything with a separator) are used as-is.
/// Falls back to the bare name if resolution fails, so the spawn error names
/// the program the caller asked for.
pub fn resolve_executable(executable: &str) -> String {
    if Path::new(executable).components().count() > 1 || executable.contains('/') {
        return executable.to_string();
    }

    match which::which(OsStr::new(executable)) {
        Ok(path) => {
            let resolved = path.to_string_lossy().to_string();
            debug!("🔍 Resolved executable '{}' to '{}'", executable, resolved);
            resolved
        }
        Err(_) => {
            debug!(
                "⚠️  Could not resolve executable '{}' in PATH, using it unchanged",
                executable
            );
            executable.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = CommandSpec::new("build/sbt");
        assert_eq!(spec.output, OutputMode::Stream);
        assert!(spec.throw_on_error);
        assert!(spec.print_cmd);
        assert!(!spec.discard_stderr);
        assert!(spec.env.is_empty());
    }

    #[test]
    fn test_display_joins_args() {
        let spec = CommandSpec::new("pip3")
            .args(["uninstall", "--yes"])
            .arg("delta-spark")
            .env("PIP_NO_INPUT", "1")
            .capture();
        assert_eq!(spec.display(), "pip3 uninstall --yes delta-spark");
        assert_eq!(spec.output, OutputMode::Capture);
        assert_eq!(spec.env.get("PIP_NO_INPUT").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_resolve_keeps_paths() {
        assert_eq!(resolve_executable("/repo/build/sbt"), "/repo/build/sbt");
        assert_eq!(resolve_executable("dev/lint-python"), "dev/lint-python");
    }

    #[test]
    fn test_resolve_unknown_program_is_unchanged() {
        assert_eq!(
            resolve_executable("definitely-not-a-real-tool-4821"),
            "definitely-not-a-real-tool-4821"
        );
    }
}
