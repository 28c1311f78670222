//! Command implementations for the conformance CLI

use tooltest::{ConsoleReporter, JsonReporter, RenderOptions, RunReport, SuiteRunner};

use super::{CliError, CliResult, ExitCode};
use crate::config::{HarnessConfig, ReportFormat};
use crate::rewriter;

/// Validate the configuration, build the suite from the fixture tree and run it.
///
/// ## Errors
///
/// - exit code 2 for configuration errors and tools that cannot be started
/// - exit code 1 when any selected case failed (an empty fixture tree is not a failure)
pub fn run_conformance(config: &HarnessConfig) -> CliResult<ExitCode> {
    config.validate()?;

    let suite = rewriter::build_suite(config)?;
    if suite.is_empty() {
        eprintln!(
            "No fixtures found in '{}'\nInputs should be *.{} files under good_no_fix/, good_can_fix/, bad_with_fix/ or bad_without_fix/",
            config.input_dir.display(),
            config.extension
        );
        return Ok(ExitCode::SUCCESS); // nothing selected means nothing failed
    }
    tracing::info!(cases = suite.len(), tool = %config.tool_path.display(), "running conformance suite");

    let runner = SuiteRunner::new(&suite)
        .with_policy(config.policy.clone())
        .stop_on_fail(config.stop_on_fail);

    let report: RunReport = match config.format {
        ReportFormat::Console => {
            let opts = RenderOptions {
                color: config.color,
                verbose: config.verbose,
            };
            runner.run(&mut ConsoleReporter::stdout(opts))?
        }
        ReportFormat::Json => runner.run(&mut JsonReporter::stdout())?,
    };

    if report.failed_count() > 0 {
        // Cases failed - return error with empty message (summary already printed)
        Err(CliError::failure(""))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
