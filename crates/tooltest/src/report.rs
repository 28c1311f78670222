//! Run reporting.
//!
//! ## Reporter Trait
//!
//! The runner talks to a [`Reporter`] instead of printing, so output format is
//! independent of execution. [`ConsoleReporter`] prints pytest-style progress
//! and a summary; [`JsonReporter`] emits the whole [`RunReport`] as JSON;
//! [`NullReporter`] discards everything.
//!
//! The summary produced by [`render_summary`] contains no timing data, so two
//! runs of the same suite against the same fixtures render identically.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::assertion::CaseStatus;
use crate::case::CaseReport;
use crate::runner::RunReport;

const BANNER: &str = "===================";

// ============================================================================
// Reporter trait
// ============================================================================

/// Receives run events from [`crate::SuiteRunner`].
pub trait Reporter {
    /// Called before the first case runs.
    fn on_run_start(&mut self, _case_count: usize) -> io::Result<()> {
        Ok(())
    }

    /// Called when a selected case completes.
    fn on_case_complete(&mut self, case: &CaseReport) -> io::Result<()>;

    /// Called when a case ran but did not match the selection policy.
    fn on_case_deselected(&mut self, _case: &CaseReport) -> io::Result<()> {
        Ok(())
    }

    /// Called once after the last case.
    fn on_run_complete(&mut self, report: &RunReport) -> io::Result<()>;
}

/// Discards all events.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_case_complete(&mut self, _case: &CaseReport) -> io::Result<()> {
        Ok(())
    }

    fn on_run_complete(&mut self, _report: &RunReport) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Summary rendering
// ============================================================================

/// Presentation switches shared by the console output functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap statuses in ANSI color codes.
    pub color: bool,
    /// Dump invocation logs of failed cases.
    pub verbose: bool,
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn status_text(status: CaseStatus, color: bool) -> String {
    let code = match status {
        CaseStatus::Passed => "32",
        CaseStatus::Failed => "31",
        CaseStatus::NotRun => "33",
    };
    paint(status.label(), code, color)
}

fn indent_block(out: &mut String, text: &str, prefix: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "{prefix}{line}");
    }
}

/// Render the captured invocations of one case.
pub fn render_invocations(case: &CaseReport) -> String {
    let mut out = String::new();
    for log in &case.invocations {
        let _ = writeln!(out, "    $ {}", log.command_line());
        let _ = writeln!(out, "      returncode: {}", log.output.returncode());
        let stdout = log.output.stdout_lossy();
        if !stdout.trim().is_empty() {
            let _ = writeln!(out, "      stdout:");
            indent_block(&mut out, &stdout, "        ");
        }
        let stderr = log.output.stderr_lossy();
        if !stderr.trim().is_empty() {
            let _ = writeln!(out, "      stderr:");
            indent_block(&mut out, &stderr, "        ");
        }
    }
    out
}

/// Every selected case with its status; failures list their messages.
pub fn render_summary(report: &RunReport, opts: RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{BANNER} SUMMARY {BANNER}");
    for case in &report.cases {
        let status = case.status();
        let _ = writeln!(out, "{} {}", case.label, status_text(status, opts.color));
        if status == CaseStatus::Failed {
            for message in case.failure_messages() {
                let _ = writeln!(out, "    {message}");
            }
            if opts.verbose {
                out.push_str(&render_invocations(case));
            }
        }
    }
    for label in &report.not_run {
        let _ = writeln!(out, "{label} {}", status_text(CaseStatus::NotRun, opts.color));
    }
    if report.stopped_early {
        let _ = writeln!(out, "stopped after first failure");
    }
    out
}

/// `2 passed, 1 failed, 3 deselected, 1 not run`, or `no cases selected`.
pub fn summary_counts(report: &RunReport) -> String {
    let mut parts = Vec::new();
    if report.passed > 0 {
        parts.push(format!("{} passed", report.passed));
    }
    if report.failed > 0 {
        parts.push(format!("{} failed", report.failed));
    }
    if !report.deselected.is_empty() {
        parts.push(format!("{} deselected", report.deselected.len()));
    }
    if !report.not_run.is_empty() {
        parts.push(format!("{} not run", report.not_run.len()));
    }
    if parts.is_empty() {
        "no cases selected".to_string()
    } else {
        parts.join(", ")
    }
}

// ============================================================================
// Console reporter
// ============================================================================

/// Pytest-style console output.
pub struct ConsoleReporter<W: Write> {
    out: W,
    opts: RenderOptions,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(opts: RenderOptions) -> Self {
        Self::new(io::stdout(), opts)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, opts: RenderOptions) -> Self {
        Self { out, opts }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_run_start(&mut self, case_count: usize) -> io::Result<()> {
        let title = paint(&format!("{BANNER} conformance run starts {BANNER}"), "1", self.opts.color);
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "collected {case_count} case(s)")?;
        writeln!(self.out)
    }

    fn on_case_complete(&mut self, case: &CaseReport) -> io::Result<()> {
        let status = status_text(case.status(), self.opts.color);
        if self.opts.verbose {
            writeln!(self.out, "{} {} ({}ms)", case.label, status, case.duration.as_millis())
        } else {
            writeln!(self.out, "{} {}", case.label, status)
        }
    }

    fn on_case_deselected(&mut self, case: &CaseReport) -> io::Result<()> {
        if self.opts.verbose {
            let status = paint("DESELECTED", "33", self.opts.color);
            writeln!(self.out, "{} {}", case.label, status)?;
        }
        Ok(())
    }

    fn on_run_complete(&mut self, report: &RunReport) -> io::Result<()> {
        writeln!(self.out)?;
        write!(self.out, "{}", render_summary(report, self.opts))?;
        let footer = format!(
            "{BANNER} {} in {:.2}s {BANNER}",
            summary_counts(report),
            report.duration.as_secs_f64()
        );
        let code = if report.failed > 0 { "1;31" } else { "1;32" };
        writeln!(self.out, "{}", paint(&footer, code, self.opts.color))?;
        self.out.flush()
    }
}

// ============================================================================
// JSON reporter
// ============================================================================

/// Writes the final [`RunReport`] as pretty-printed JSON.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl JsonReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn on_case_complete(&mut self, _case: &CaseReport) -> io::Result<()> {
        Ok(())
    }

    fn on_run_complete(&mut self, report: &RunReport) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
