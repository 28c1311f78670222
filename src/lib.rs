#![forbid(unsafe_code)]
//! Rewrite conformance harness
//!
//! Runs a source rewriting tool over categorized fixture files and checks, per
//! category, that it either leaves no rewritten artifact behind or writes one
//! that matches the reference `.fixed` file byte for byte. The generic harness
//! (tool wrapper, cases, runner, reporters) lives in the `tooltest` crate; this
//! crate supplies fixture discovery, tool wiring, configuration and the CLI.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Limitations
//!
//! Cases run sequentially with no timeout. A tool that hangs stalls the run.

pub mod cli;
pub mod config;
pub mod fixtures;
pub mod rewriter;

pub use config::{HarnessConfig, ReportFormat};
pub use fixtures::{Fixture, FixtureCategory};
