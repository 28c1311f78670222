//! Wiring between fixtures and the harness: the tool under test, the diff
//! checker, and one scenario per fixture.

use std::path::Path;

use tooltest::scenario::diff_checker;
use tooltest::{ArtifactAbsent, ArtifactProduced, CommandTemplate, HarnessResult, Suite, TestCase, Tool};

use crate::config::HarnessConfig;
use crate::fixtures::{self, Fixture};

/// `<tool> <inputs...> -- <fixed flags...> <trailing...>` with tracing enabled.
pub fn rewriter_tool(path: &Path, flags: &[String], trace_var: &str) -> Tool {
    let template = CommandTemplate::new(path.to_string_lossy())
        .inputs()
        .literal("--")
        .literals(flags.iter().cloned())
        .trailing();
    Tool::new("rewriter", template).with_env(trace_var, "1")
}

/// Map a fixture to the scenario its category calls for.
pub fn case_for(fixture: &Fixture, config: &HarnessConfig) -> Box<dyn TestCase> {
    if fixture.category.expects_artifact() {
        Box::new(ArtifactProduced::new(
            &fixture.path,
            config.layout.clone(),
            diff_checker(config.diff_program.as_str()),
        ))
    } else {
        Box::new(ArtifactAbsent::new(&fixture.path, config.layout.clone()))
    }
}

/// Build the suite for every fixture under the configured input root.
pub fn build_suite(config: &HarnessConfig) -> HarnessResult<Suite> {
    let fixtures = fixtures::discover(&config.input_dir, &config.extension)?;
    let tool = rewriter_tool(&config.tool_path, &config.tool_flags, &config.trace_var);
    let cases = fixtures.iter().map(|f| case_for(f, config)).collect();
    Ok(Suite::new(tool, cases))
}
