//! CLI module for the rewrite conformance harness
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros. Every option is
//! optional and only overrides the matching field of [`HarnessConfig`], so the
//! defaults live in one place.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.
//!
//! ## Exit codes
//!
//! - `0` - every selected case passed
//! - `1` - at least one selected case failed
//! - `2` - harness error (bad configuration, tool could not be started)

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tooltest::{ArtifactLayout, HarnessError, SelectionPolicy};

use crate::config::{HarnessConfig, ReportFormat};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    pub const HARNESS_ERROR: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HarnessError> for CliError {
    /// Harness errors are rendered as miette diagnostics and exit with code 2.
    fn from(err: HarnessError) -> Self {
        let report = miette::Report::new(err);
        Self::new(format!("{report:?}"), ExitCode::HARNESS_ERROR)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Conformance harness for a source rewriting tool
#[derive(Parser, Debug)]
#[command(name = "rewrite-conformance")]
#[command(version = VERSION)]
#[command(about = "Run a source rewriting tool over categorized fixtures and check its artifacts", long_about = None)]
pub struct Cli {
    /// Executable under test (default: ./rewriter)
    #[arg(long = "tool", visible_alias = "rewriter", value_name = "PATH")]
    pub tool: Option<PathBuf>,

    /// Directory containing good_no_fix/, good_can_fix/, bad_with_fix/, bad_without_fix/
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Extension of fixture inputs (default: cpp)
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Suffix the tool appends to rewritten files (default: generated)
    #[arg(long = "artifact-suffix", value_name = "SUFFIX")]
    pub artifact_suffix: Option<String>,

    /// Suffix of reference files (default: fixed)
    #[arg(long = "reference-suffix", value_name = "SUFFIX")]
    pub reference_suffix: Option<String>,

    /// Flag passed to the tool after `--`; repeat to pass several (default: -std=c++0x -w)
    #[arg(long = "tool-flag", value_name = "FLAG", allow_hyphen_values = true)]
    pub tool_flags: Vec<String>,

    /// Environment variable set to 1 to enable tracing in the tool (default: REWRITE_TRACE)
    #[arg(long = "trace-var", value_name = "NAME")]
    pub trace_var: Option<String>,

    /// Program used to compare artifacts with reference files (default: diff)
    #[arg(long = "diff-tool", value_name = "PROGRAM")]
    pub diff_tool: Option<String>,

    // Selection policy
    /// Only count cases with an invocation whose command line contains PATTERN
    #[arg(long = "match-command", value_name = "PATTERN")]
    pub match_command: Option<String>,

    /// Only count cases with an invocation that returned CODE
    #[arg(long = "match-return", value_name = "CODE", allow_negative_numbers = true)]
    pub match_return: Option<i32>,

    /// Only count cases with an invocation whose stdout contains PATTERN
    #[arg(long = "match-stdout", value_name = "PATTERN")]
    pub match_stdout: Option<String>,

    /// Only count cases with an invocation whose stderr contains PATTERN
    #[arg(long = "match-stderr", value_name = "PATTERN")]
    pub match_stderr: Option<String>,

    /// Verbose output (per-case timing, invocation logs of failures)
    #[arg(short, long)]
    pub verbose: bool,

    /// Stop on first failure
    #[arg(short = 'x', long = "exitfirst")]
    pub stop_on_fail: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    pub format: ReportFormat,

    /// Disable ANSI colors
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    /// Apply the given options on top of [`HarnessConfig::default`].
    pub fn into_config(self) -> HarnessConfig {
        let mut config = HarnessConfig::default();
        if let Some(tool) = self.tool {
            config = config.with_tool_path(tool);
        }
        if let Some(dir) = self.input_dir {
            config = config.with_input_dir(dir);
        }
        if let Some(ext) = self.extension {
            config = config.with_extension(ext);
        }
        let layout = ArtifactLayout::new(
            self.artifact_suffix
                .unwrap_or_else(|| config.layout.artifact_suffix.clone()),
            self.reference_suffix
                .unwrap_or_else(|| config.layout.reference_suffix.clone()),
        );
        config = config.with_layout(layout);
        if !self.tool_flags.is_empty() {
            config = config.with_tool_flags(self.tool_flags);
        }
        if let Some(var) = self.trace_var {
            config = config.with_trace_var(var);
        }
        if let Some(diff) = self.diff_tool {
            config = config.with_diff_program(diff);
        }

        let policy = SelectionPolicy {
            command: self.match_command,
            returncode: self.match_return,
            stdout: self.match_stdout,
            stderr: self.match_stderr,
        };
        let color = !self.no_color && std::io::stdout().is_terminal();

        config
            .with_policy(policy)
            .with_stop_on_fail(self.stop_on_fail)
            .with_verbose(self.verbose)
            .with_format(self.format)
            .with_color(color)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.into_config();
    commands::run_conformance(&config)
}

// ============================================================================
// Tests
// ============================================================================
