//! Selection policy: which cases count toward a run's totals.

use serde::Serialize;

use crate::invocation::InvocationLog;

/// Filters over the tool-under-test invocations of a case. Every unset filter
/// matches everything. Secondary tools such as the diff checker are never
/// consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionPolicy {
    /// Substring of the rendered command line.
    pub command: Option<String>,
    /// Exact return code.
    pub returncode: Option<i32>,
    /// Substring of captured stdout.
    pub stdout: Option<String>,
    /// Substring of captured stderr.
    pub stderr: Option<String>,
}

impl SelectionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(mut self, pattern: impl Into<String>) -> Self {
        self.command = Some(pattern.into());
        self
    }

    pub fn with_returncode(mut self, code: i32) -> Self {
        self.returncode = Some(code);
        self
    }

    pub fn with_stdout(mut self, pattern: impl Into<String>) -> Self {
        self.stdout = Some(pattern.into());
        self
    }

    pub fn with_stderr(mut self, pattern: impl Into<String>) -> Self {
        self.stderr = Some(pattern.into());
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.command.is_none() && self.returncode.is_none() && self.stdout.is_none() && self.stderr.is_none()
    }

    /// Does a single invocation satisfy every configured filter?
    pub fn matches(&self, log: &InvocationLog) -> bool {
        if let Some(pattern) = &self.command {
            if !log.command_line().contains(pattern.as_str()) {
                return false;
            }
        }
        if let Some(code) = self.returncode {
            if log.output.returncode() != code {
                return false;
            }
        }
        if let Some(pattern) = &self.stdout {
            if !log.output.stdout_lossy().contains(pattern.as_str()) {
                return false;
            }
        }
        if let Some(pattern) = &self.stderr {
            if !log.output.stderr_lossy().contains(pattern.as_str()) {
                return false;
            }
        }
        true
    }

    /// A case is selected when any of the given invocations matches.
    pub fn matches_case<'a, I>(&self, logs: I) -> bool
    where
        I: IntoIterator<Item = &'a InvocationLog>,
    {
        self.is_unrestricted() || logs.into_iter().any(|log| self.matches(log))
    }
}
