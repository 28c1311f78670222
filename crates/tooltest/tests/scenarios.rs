//! End-to-end scenario tests against a scripted stand-in for the tool under test.
//!
//! The stand-in is a shell script run through `sh`, so these tests are unix-only.

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use tooltest::scenario::diff_checker;
use tooltest::{
    ArtifactAbsent, ArtifactLayout, ArtifactProduced, CaseStatus, CommandTemplate, HarnessError, NullReporter,
    RenderOptions, SelectionPolicy, Suite, SuiteRunner, TestCase, Tool,
};

/// Copies `<input>.want` to `<input>.generated` when present; inputs named
/// `*broken*` exit 2 and inputs named `*late_exit*` exit 1 after the copy.
/// Refuses to run without the trace variable.
const FAKE_REWRITER: &str = r#"
in="$1"
if [ "$REWRITE_TRACE" != "1" ]; then echo "trace not set" >&2; exit 3; fi
case "$in" in *broken*) echo "cannot parse $in" >&2; exit 2;; esac
if [ -f "$in.want" ]; then cp "$in.want" "$in.generated"; fi
case "$in" in *late_exit*) exit 1;; esac
echo "processed $in"
"#;

struct Fixture {
    dir: tempfile::TempDir,
    script: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("rewriter.sh");
        fs::write(&script, FAKE_REWRITER).unwrap();
        Self { dir, script }
    }

    fn tool(&self) -> Tool {
        let template = CommandTemplate::new("sh")
            .literal(self.script.to_string_lossy())
            .inputs()
            .literal("--")
            .literals(["-std=c++0x", "-w"])
            .trailing();
        Tool::new("rewriter", template).with_env("REWRITE_TRACE", "1")
    }

    /// Write `name` with `content`, plus optional `.want` and `.fixed` siblings.
    fn input(&self, name: &str, want: Option<&str>, fixed: Option<&str>) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, "int main() {}\n").unwrap();
        if let Some(want) = want {
            fs::write(sibling(&path, "want"), want).unwrap();
        }
        if let Some(fixed) = fixed {
            fs::write(sibling(&path, "fixed"), fixed).unwrap();
        }
        path
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}.{suffix}", path.display()))
}

fn produced(input: &Path) -> Box<dyn TestCase> {
    Box::new(ArtifactProduced::new(input, ArtifactLayout::default(), diff_checker("diff")))
}

fn absent(input: &Path) -> Box<dyn TestCase> {
    Box::new(ArtifactAbsent::new(input, ArtifactLayout::default()))
}

#[test]
fn matching_artifact_passes_and_is_removed() {
    let fx = Fixture::new();
    let input = fx.input("b.cpp", Some("fixed body\n"), Some("fixed body\n"));
    let suite = Suite::new(fx.tool(), vec![produced(&input)]);

    let report = SuiteRunner::new(&suite).run(&mut NullReporter).unwrap();

    assert_eq!(report.passed, 1, "{:?}", report.cases[0].failure_messages());
    assert!(!sibling(&input, "generated").exists());
    let commands: Vec<String> = report.cases[0].invocations.iter().map(|l| l.command_line()).collect();
    assert!(commands[0].ends_with(&format!("{} -- -std=c++0x -w", input.display())));
    assert!(commands[1].starts_with("diff -s "));
}

#[test]
fn mismatching_artifact_fails_and_is_still_removed() {
    let fx = Fixture::new();
    let input = fx.input("b.cpp", Some("fixed body\n"), Some("fixed body \n"));
    let suite = Suite::new(fx.tool(), vec![produced(&input)]);

    let report = SuiteRunner::new(&suite).run(&mut NullReporter).unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.cases[0].failure_messages(), ["output file was not same as expected."]);
    assert!(!sibling(&input, "generated").exists());
}

#[test]
fn failing_tool_reports_every_broken_expectation() {
    let fx = Fixture::new();
    let input = fx.input("broken.cpp", None, Some("anything\n"));
    let suite = Suite::new(fx.tool(), vec![produced(&input)]);

    let report = SuiteRunner::new(&suite).run(&mut NullReporter).unwrap();

    let messages = report.cases[0].failure_messages();
    assert_eq!(messages.len(), 3, "{messages:?}");
    assert_eq!(messages[0], "return code was not zero.");
    assert!(messages[1].starts_with("expected "));
    assert_eq!(messages[2], "output file was not same as expected.");
}

#[test]
fn absent_scenario_passes_when_no_artifact() {
    let fx = Fixture::new();
    let input = fx.input("a.cpp", None, None);
    let suite = Suite::new(fx.tool(), vec![absent(&input)]);

    let report = SuiteRunner::new(&suite).run(&mut NullReporter).unwrap();

    assert_eq!(report.passed, 1);
    assert_eq!(report.cases[0].status(), CaseStatus::Passed);
}

#[test]
fn absent_scenario_flags_unexpected_artifact() {
    let fx = Fixture::new();
    let input = fx.input("a.cpp", Some("rewritten\n"), None);
    let suite = Suite::new(fx.tool(), vec![absent(&input)]);

    let report = SuiteRunner::new(&suite).run(&mut NullReporter).unwrap();

    assert_eq!(report.failed, 1);
    assert!(report.cases[0].failure_messages()[0].starts_with("unexpected file generated: "));
    assert!(!sibling(&input, "generated").exists());
}

#[test]
fn missing_trace_variable_is_visible_as_failure() {
    let fx = Fixture::new();
    let input = fx.input("a.cpp", None, None);
    let tool = Tool::new(
        "rewriter",
        CommandTemplate::new("sh").literal(fx.script.to_string_lossy()).inputs(),
    )
    .with_env("REWRITE_TRACE", "0");
    let suite = Suite::new(tool, vec![absent(&input)]);

    let report = SuiteRunner::new(&suite).run(&mut NullReporter).unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.cases[0].invocations[0].output.returncode(), 3);
}

#[test]
fn unstartable_checker_aborts_but_cleans_up() {
    let fx = Fixture::new();
    let input = fx.input("b.cpp", Some("x\n"), Some("x\n"));
    let case = ArtifactProduced::new(
        &input,
        ArtifactLayout::default(),
        diff_checker("/no/such/diff-for-tooltest"),
    );
    let suite = Suite::new(fx.tool(), vec![Box::new(case)]);

    let err = SuiteRunner::new(&suite).run(&mut NullReporter).unwrap_err();

    assert!(matches!(err, HarnessError::Spawn { .. }));
    assert!(!sibling(&input, "generated").exists());
}

#[test]
fn stderr_filter_counts_only_matching_cases() {
    let fx = Fixture::new();
    let good = fx.input("a.cpp", None, None);
    let broken = fx.input("broken.cpp", None, None);
    let suite = Suite::new(fx.tool(), vec![absent(&good), absent(&broken)]);

    let report = SuiteRunner::new(&suite)
        .with_policy(SelectionPolicy::new().with_stderr("cannot parse"))
        .run(&mut NullReporter)
        .unwrap();

    assert_eq!(report.executed_count(), 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.deselected, [format!("[{}]", good.display())]);
}

#[test]
fn returncode_filter_ignores_checker_exit_status() {
    let fx = Fixture::new();
    let input = fx.input("late_exit.cpp", Some("y\n"), Some("y\n"));
    let suite = Suite::new(fx.tool(), vec![produced(&input)]);

    let report = SuiteRunner::new(&suite)
        .with_policy(SelectionPolicy::new().with_returncode(0))
        .run(&mut NullReporter)
        .unwrap();

    assert_eq!(report.executed_count(), 0);
    assert_eq!(report.deselected, [format!("[{}]", input.display())]);
    assert!(!sibling(&input, "generated").exists());
}

#[test]
fn stdout_filter_ignores_checker_output() {
    let fx = Fixture::new();
    let input = fx.input("b.cpp", Some("y\n"), Some("y\n"));
    let suite = Suite::new(fx.tool(), vec![produced(&input)]);

    // `diff -s` reports "Files ... are identical"; the rewriter never does.
    let report = SuiteRunner::new(&suite)
        .with_policy(SelectionPolicy::new().with_stdout("identical"))
        .run(&mut NullReporter)
        .unwrap();

    assert_eq!(report.executed_count(), 0);
    assert_eq!(report.deselected.len(), 1);

    let report = SuiteRunner::new(&suite)
        .with_policy(SelectionPolicy::new().with_stdout("processed"))
        .run(&mut NullReporter)
        .unwrap();

    assert_eq!(report.passed, 1);
}

#[test]
fn repeated_runs_render_identical_summaries() {
    let fx = Fixture::new();
    let suite = Suite::new(
        fx.tool(),
        vec![
            absent(&fx.input("a.cpp", None, None)),
            produced(&fx.input("b.cpp", Some("y\n"), Some("y\n"))),
            produced(&fx.input("c.cpp", Some("y\n"), Some("z\n"))),
        ],
    );
    let runner = SuiteRunner::new(&suite);

    let first = runner.run(&mut NullReporter).unwrap();
    let second = runner.run(&mut NullReporter).unwrap();

    let opts = RenderOptions::default();
    assert_eq!(
        tooltest::report::render_summary(&first, opts),
        tooltest::report::render_summary(&second, opts)
    );
    assert_eq!((first.passed, first.failed), (2, 1));
}
