//! Sequential suite runner.
//!
//! Cases run one at a time, in suite order, each blocking on its subprocesses.
//! There is no timeout: a tool that never exits stalls the whole run.
//!
//! Selection is decided after a case has run, because the return code and
//! output filters can only be evaluated against real invocations. Only the
//! invocations of the tool under test are considered. Cases that
//! do not match are reported as deselected and do not touch the totals.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::case::{CaseContext, CaseReport};
use crate::error::HarnessResult;
use crate::invocation::serialize_duration;
use crate::policy::SelectionPolicy;
use crate::report::Reporter;
use crate::suite::Suite;

/// Totals and per-case results of one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Selected cases, in execution order.
    pub cases: Vec<CaseReport>,
    /// Labels of cases that ran but did not match the selection policy.
    pub deselected: Vec<String>,
    pub passed: usize,
    pub failed: usize,
    /// Set when the run stopped at the first failure.
    pub stopped_early: bool,
    /// Labels of cases skipped after an early stop.
    pub not_run: Vec<String>,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
}

impl RunReport {
    pub fn failed_count(&self) -> usize {
        self.failed
    }

    pub fn executed_count(&self) -> usize {
        self.passed + self.failed
    }

    /// Process exit status for this run: 0 iff nothing failed.
    pub fn exit_code(&self) -> i32 {
        if self.failed == 0 { 0 } else { 1 }
    }
}

/// Drives a [`Suite`] under a [`SelectionPolicy`].
pub struct SuiteRunner<'a> {
    suite: &'a Suite,
    policy: SelectionPolicy,
    stop_on_fail: bool,
}

impl<'a> SuiteRunner<'a> {
    pub fn new(suite: &'a Suite) -> Self {
        Self {
            suite,
            policy: SelectionPolicy::default(),
            stop_on_fail: false,
        }
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn stop_on_fail(mut self, stop: bool) -> Self {
        self.stop_on_fail = stop;
        self
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Run every case and return the aggregated report.
    ///
    /// A harness error (a tool that cannot be started, a reporter that cannot
    /// write) aborts the run immediately.
    #[tracing::instrument(skip_all, fields(tool = %self.suite.tool().name(), cases = self.suite.len()))]
    pub fn run(&self, reporter: &mut dyn Reporter) -> HarnessResult<RunReport> {
        let start = Instant::now();
        let mut report = RunReport::default();
        reporter.on_run_start(self.suite.len())?;

        let cases = self.suite.cases();
        for (index, case) in cases.iter().enumerate() {
            let label = case.label().to_string();
            tracing::debug!(case = %label, "running case");

            let case_start = Instant::now();
            let mut ctx = CaseContext::new(self.suite.tool());
            case.run(&mut ctx)?;
            let case_report = ctx.finish(label, case_start.elapsed());

            if !self.policy.matches_case(case_report.target_invocations()) {
                tracing::debug!(case = %case_report.label, "case deselected");
                reporter.on_case_deselected(&case_report)?;
                report.deselected.push(case_report.label);
                continue;
            }

            let passed = case_report.passed();
            if passed {
                report.passed += 1;
            } else {
                report.failed += 1;
            }
            reporter.on_case_complete(&case_report)?;
            report.cases.push(case_report);

            if self.stop_on_fail && !passed {
                report.stopped_early = true;
                report.not_run = cases[index + 1..].iter().map(|c| c.label().to_string()).collect();
                break;
            }
        }

        report.duration = start.elapsed();
        reporter.on_run_complete(&report)?;
        Ok(report)
    }
}
