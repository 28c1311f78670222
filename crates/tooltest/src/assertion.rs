//! Non-fatal assertion outcomes.
//!
//! Assertions never unwind. Each one appends an [`AssertionOutcome`] and the
//! case keeps going, so a single run can surface several independent defects.

use serde::Serialize;

/// Message used when a case finishes without recording anything.
pub const NO_ASSERTIONS_MSG: &str = "case recorded no assertions";

/// Result of one assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionOutcome {
    /// Short description of the predicate, e.g. `assert_equal(0, 1)`.
    pub description: String,
    pub passed: bool,
    /// Shown in the summary when the assertion failed.
    pub message: String,
}

/// Lifecycle status of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStatus {
    NotRun,
    Passed,
    Failed,
}

impl CaseStatus {
    pub fn label(self) -> &'static str {
        match self {
            CaseStatus::NotRun => "NOT RUN",
            CaseStatus::Passed => "PASSED",
            CaseStatus::Failed => "FAILED",
        }
    }
}

/// Ordered accumulator of assertion outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Outcomes(Vec<AssertionOutcome>);

impl Outcomes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, description: impl Into<String>, passed: bool, message: impl Into<String>) {
        let outcome = AssertionOutcome {
            description: description.into(),
            passed,
            message: message.into(),
        };
        if !outcome.passed {
            tracing::debug!(description = %outcome.description, message = %outcome.message, "assertion failed");
        }
        self.0.push(outcome);
    }

    pub fn assert_true(&mut self, condition: bool, message: impl Into<String>) {
        self.record("assert_true", condition, message);
    }

    pub fn assert_false(&mut self, condition: bool, message: impl Into<String>) {
        self.record("assert_false", !condition, message);
    }

    pub fn assert_equal<T>(&mut self, expected: T, actual: T, message: impl Into<String>)
    where
        T: PartialEq + std::fmt::Debug,
    {
        let description = format!("assert_equal({expected:?}, {actual:?})");
        self.record(description, expected == actual, message);
    }

    pub fn as_slice(&self) -> &[AssertionOutcome] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssertionOutcome> {
        self.0.iter().filter(|o| !o.passed)
    }

    /// Status derived from the recorded outcomes.
    ///
    /// An empty list counts as failed: a case that checked nothing proves nothing.
    pub fn status(&self) -> CaseStatus {
        if self.0.is_empty() || self.0.iter().any(|o| !o.passed) {
            CaseStatus::Failed
        } else {
            CaseStatus::Passed
        }
    }

    /// Failure messages in recording order, including the no-assertion notice.
    pub fn failure_messages(&self) -> Vec<String> {
        if self.0.is_empty() {
            return vec![NO_ASSERTIONS_MSG.to_string()];
        }
        self.failures().map(|o| o.message.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_outcomes_fail() {
        let outcomes = Outcomes::new();
        assert_eq!(outcomes.status(), CaseStatus::Failed);
        assert_eq!(outcomes.failure_messages(), [NO_ASSERTIONS_MSG]);
    }

    #[test]
    fn test_all_passing_outcomes_pass() {
        let mut outcomes = Outcomes::new();
        outcomes.assert_true(true, "unused");
        outcomes.assert_false(false, "unused");
        outcomes.assert_equal(0, 0, "unused");
        assert_eq!(outcomes.status(), CaseStatus::Passed);
        assert!(outcomes.failure_messages().is_empty());
    }

    #[test]
    fn test_failure_does_not_stop_later_assertions() {
        let mut outcomes = Outcomes::new();
        outcomes.assert_true(false, "first");
        outcomes.assert_equal(0, 1, "second");
        outcomes.assert_true(true, "third");
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes.status(), CaseStatus::Failed);
        assert_eq!(outcomes.failure_messages(), ["first", "second"]);
    }

    #[test]
    fn test_assert_equal_describes_operands() {
        let mut outcomes = Outcomes::new();
        outcomes.assert_equal(0, 2, "diff reported changes");
        assert_eq!(outcomes.as_slice()[0].description, "assert_equal(0, 2)");
    }
}
