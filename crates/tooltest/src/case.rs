//! Test case model.
//!
//! A [`TestCase`] is an immutable scenario definition. Running it hands it a
//! fresh [`CaseContext`], which owns the assertion outcomes and invocation logs
//! for that run only. The context is consumed into a [`CaseReport`] when the
//! case returns, so no state carries over between runs.

use std::time::Duration;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::assertion::{AssertionOutcome, CaseStatus, Outcomes};
use crate::error::HarnessResult;
use crate::invocation::{Invocation, InvocationLog};
use crate::tool::{Tool, ToolArgs};

/// A named verification scenario.
pub trait TestCase {
    /// Label shown in reports, usually the input path in brackets.
    fn label(&self) -> &str;

    /// Perform the invocations and record assertions.
    ///
    /// Return `Err` only for harness-level failures (a tool that cannot be
    /// started). Anything the scenario is checking goes through the context.
    fn run(&self, ctx: &mut CaseContext<'_>) -> HarnessResult<()>;
}

/// Per-run state handed to [`TestCase::run`].
pub struct CaseContext<'a> {
    target: &'a Tool,
    outcomes: Outcomes,
    invocations: Vec<InvocationLog>,
    target_indices: Vec<usize>,
}

impl<'a> CaseContext<'a> {
    pub fn new(target: &'a Tool) -> Self {
        Self {
            target,
            outcomes: Outcomes::new(),
            invocations: Vec::new(),
            target_indices: Vec::new(),
        }
    }

    /// The tool under test.
    pub fn target(&self) -> &'a Tool {
        self.target
    }

    /// Invoke the tool under test. Its result becomes the subject of [`assert_output`].
    ///
    /// [`assert_output`]: CaseContext::assert_output
    pub fn invoke_target(&mut self, args: &ToolArgs) -> HarnessResult<&Invocation> {
        let log = self.target.call(args)?;
        self.invocations.push(log);
        let idx = self.invocations.len() - 1;
        self.target_indices.push(idx);
        Ok(&self.invocations[idx].output)
    }

    /// Invoke a secondary tool (for example a diff checker).
    pub fn invoke(&mut self, tool: &Tool, args: &ToolArgs) -> HarnessResult<&Invocation> {
        let log = tool.call(args)?;
        self.invocations.push(log);
        let idx = self.invocations.len() - 1;
        Ok(&self.invocations[idx].output)
    }

    /// Most recent result of the tool under test.
    pub fn last_output(&self) -> Option<&Invocation> {
        self.target_indices.last().map(|&idx| &self.invocations[idx].output)
    }

    pub fn invocations(&self) -> &[InvocationLog] {
        &self.invocations
    }

    pub fn assert_true(&mut self, condition: bool, message: impl Into<String>) {
        self.outcomes.assert_true(condition, message);
    }

    pub fn assert_false(&mut self, condition: bool, message: impl Into<String>) {
        self.outcomes.assert_false(condition, message);
    }

    pub fn assert_equal<T>(&mut self, expected: T, actual: T, message: impl Into<String>)
    where
        T: PartialEq + std::fmt::Debug,
    {
        self.outcomes.assert_equal(expected, actual, message);
    }

    /// Evaluate `predicate` over the last result of the tool under test.
    pub fn assert_output<F>(&mut self, predicate: F, message: impl Into<String>)
    where
        F: FnOnce(&Invocation) -> bool,
    {
        match self.last_output().map(predicate) {
            Some(passed) => self.outcomes.record("assert_output", passed, message),
            None => self
                .outcomes
                .record("assert_output", false, "no invocation recorded"),
        }
    }

    pub fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    pub(crate) fn finish(self, label: String, duration: Duration) -> CaseReport {
        CaseReport {
            label,
            outcomes: self.outcomes,
            invocations: self.invocations,
            target_indices: self.target_indices,
            duration,
        }
    }
}

/// Everything one run of a case produced.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub label: String,
    pub outcomes: Outcomes,
    pub invocations: Vec<InvocationLog>,
    /// Positions in `invocations` that ran the tool under test.
    pub target_indices: Vec<usize>,
    pub duration: Duration,
}

// Hand-written to carry the computed status.
impl Serialize for CaseReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CaseReport", 6)?;
        state.serialize_field("label", &self.label)?;
        state.serialize_field("status", &self.status())?;
        state.serialize_field("outcomes", &self.outcomes)?;
        state.serialize_field("invocations", &self.invocations)?;
        state.serialize_field("target_invocations", &self.target_indices)?;
        state.serialize_field("duration", &self.duration.as_secs_f64())?;
        state.end()
    }
}

impl CaseReport {
    pub fn status(&self) -> CaseStatus {
        self.outcomes.status()
    }

    pub fn passed(&self) -> bool {
        self.status() == CaseStatus::Passed
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssertionOutcome> {
        self.outcomes.failures()
    }

    /// Invocations of the tool under test, excluding secondary tools such as checkers.
    pub fn target_invocations(&self) -> impl Iterator<Item = &InvocationLog> {
        self.target_indices.iter().filter_map(|&idx| self.invocations.get(idx))
    }

    pub fn failure_messages(&self) -> Vec<String> {
        self.outcomes.failure_messages()
    }
}
