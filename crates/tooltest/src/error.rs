//! Harness-level errors.
//!
//! Only conditions that make a run meaningless live here. Assertion failures and
//! unexpected filesystem state are recorded on the case instead (see
//! [`crate::assertion`]), so they never surface as a `HarnessError`.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort a suite run.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    /// The wrapped executable could not be located or started.
    #[error("failed to start `{program}` for tool '{tool}'")]
    #[diagnostic(
        code(tooltest::spawn),
        help("check that the executable exists, is executable, and is on PATH if given by name")
    )]
    Spawn {
        tool: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or missing configuration supplied by the caller.
    #[error("invalid configuration: {0}")]
    #[diagnostic(code(tooltest::config))]
    Config(String),

    /// A tool was asked to render a command from an empty template.
    #[error("tool '{0}' has an empty command template")]
    #[diagnostic(code(tooltest::template))]
    EmptyTemplate(String),

    /// Filesystem access outside of any case failed.
    #[error("I/O error on {}", path.display())]
    #[diagnostic(code(tooltest::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reporter could not write its output.
    #[error("failed to write report")]
    #[diagnostic(code(tooltest::report))]
    Report(#[from] std::io::Error),
}

impl HarnessError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
