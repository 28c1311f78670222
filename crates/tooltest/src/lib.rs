#![forbid(unsafe_code)]
//! Harness primitives for conformance-testing external command-line tools.
//!
//! - [`Tool`] renders a [`CommandTemplate`] and runs it, yielding an [`InvocationLog`].
//! - [`TestCase`] implementations record non-fatal assertions through a [`CaseContext`].
//! - [`scenario`] provides the two artifact scenarios (produced and matching, or absent).
//! - [`SuiteRunner`] runs a [`Suite`] in order under a [`SelectionPolicy`] and returns a [`RunReport`].
//!
//! ## Error Policy
//!
//! Assertion failures are data, recorded on the case. Only conditions that make
//! the run meaningless (a tool that cannot be started, bad configuration, a
//! reporter that cannot write) are returned as [`HarnessError`].

pub mod assertion;
pub mod case;
pub mod error;
pub mod invocation;
pub mod policy;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod suite;
pub mod tool;

pub use assertion::{AssertionOutcome, CaseStatus, Outcomes};
pub use case::{CaseContext, CaseReport, TestCase};
pub use error::{HarnessError, HarnessResult};
pub use invocation::{Invocation, InvocationLog};
pub use policy::SelectionPolicy;
pub use report::{ConsoleReporter, JsonReporter, NullReporter, RenderOptions, Reporter};
pub use runner::{RunReport, SuiteRunner};
pub use scenario::{ArtifactAbsent, ArtifactLayout, ArtifactProduced};
pub use suite::Suite;
pub use tool::{CommandTemplate, TemplateToken, Tool, ToolArgs};
