//! Fake command runner for pipeline tests

use crate::exceptions::Result;
use crate::process::{CommandOutcome, CommandRunner, CommandSpec};
use std::cell::RefCell;

/// Records every command and fails those matching a configured fragment
#[derive(Debug, Default)]
pub(crate) struct RecordingRunner {
    calls: RefCell<Vec<CommandSpec>>,
    failures: Vec<(String, i32)>,
}

impl RecordingRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Commands whose command line contains `fragment` exit with `code`
    pub(crate) fn failing_on(mut self, fragment: &str, code: i32) -> Self {
        self.failures.push((fragment.to_string(), code));
        self
    }

    pub(crate) fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(CommandSpec::display).collect()
    }

    pub(crate) fn count_matching(&self, fragment: &str) -> usize {
        self.command_lines()
            .iter()
            .filter(|line| line.contains(fragment))
            .count()
    }
}

impl CommandRunner for RecordingRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        self.calls.borrow_mut().push(spec.clone());
        let line = spec.display();
        let exit_code = self
            .failures
            .iter()
            .find(|(fragment, _)| line.contains(fragment.as_str()))
            .map(|(_, code)| *code)
            .unwrap_or(0);
        Ok(CommandOutcome::streamed(exit_code))
    }
}
