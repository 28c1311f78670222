//! Artifact scenarios.
//!
//! Both scenarios run the tool under test on a single input file and then
//! inspect the derived artifact at `<input>.<artifact suffix>`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::case::{CaseContext, TestCase};
use crate::error::HarnessResult;
use crate::tool::{CommandTemplate, Tool, ToolArgs};

/// Naming rule for derived artifacts and their reference files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    pub artifact_suffix: String,
    pub reference_suffix: String,
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self {
            artifact_suffix: "generated".to_string(),
            reference_suffix: "fixed".to_string(),
        }
    }
}

impl ArtifactLayout {
    pub fn new(artifact_suffix: impl Into<String>, reference_suffix: impl Into<String>) -> Self {
        Self {
            artifact_suffix: artifact_suffix.into(),
            reference_suffix: reference_suffix.into(),
        }
    }

    pub fn artifact_path(&self, input: &Path) -> PathBuf {
        with_suffix(input, &self.artifact_suffix)
    }

    pub fn reference_path(&self, input: &Path) -> PathBuf {
        with_suffix(input, &self.reference_suffix)
    }
}

/// `a/b.cpp` + `fixed` -> `a/b.cpp.fixed`. The existing extension is kept.
fn with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// `diff -s <artifact> <reference>`: byte-exact comparison, exit 0 when identical.
pub fn diff_checker(program: impl Into<String>) -> Tool {
    Tool::new("diff", CommandTemplate::new(program).literal("-s").inputs())
}

fn case_label(input: &Path) -> String {
    format!("[{}]", input.display())
}

fn invoke_on_input(ctx: &mut CaseContext<'_>, input: &Path) -> HarnessResult<()> {
    ctx.invoke_target(&ToolArgs::new().input(input))?;
    ctx.assert_output(|out| out.returncode() == 0, "return code was not zero.");
    Ok(())
}

/// Remove the artifact so the next case sees a clean tree. A missing file is fine.
fn remove_artifact(ctx: &mut CaseContext<'_>, artifact: &Path) {
    match fs::remove_file(artifact) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %artifact.display(), error = %e, "failed to remove artifact");
            ctx.assert_true(false, format!("could not remove {}: {e}", artifact.display()));
        }
    }
}

// ============================================================================
// Artifact produced
// ============================================================================

/// The tool must produce an artifact identical to the reference file.
pub struct ArtifactProduced {
    label: String,
    input: PathBuf,
    layout: ArtifactLayout,
    checker: Tool,
}

impl ArtifactProduced {
    pub fn new(input: impl Into<PathBuf>, layout: ArtifactLayout, checker: Tool) -> Self {
        let input = input.into();
        Self {
            label: case_label(&input),
            input,
            layout,
            checker,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    fn verify(&self, ctx: &mut CaseContext<'_>, artifact: &Path) -> HarnessResult<()> {
        invoke_on_input(ctx, &self.input)?;
        ctx.assert_true(
            artifact.exists(),
            format!("expected {} file to be generated.", artifact.display()),
        );

        let reference = self.layout.reference_path(&self.input);
        let args = ToolArgs::new().input(artifact).input(&reference);
        let rc = ctx.invoke(&self.checker, &args)?.returncode();
        ctx.assert_equal(0, rc, "output file was not same as expected.");
        Ok(())
    }

}

impl TestCase for ArtifactProduced {
    fn label(&self) -> &str {
        &self.label
    }

    fn run(&self, ctx: &mut CaseContext<'_>) -> HarnessResult<()> {
        let artifact = self.layout.artifact_path(&self.input);
        let result = self.verify(ctx, &artifact);
        // Runs on every path, including a checker that failed to start.
        remove_artifact(ctx, &artifact);
        result
    }
}

// ============================================================================
// Artifact absent
// ============================================================================

/// The tool must succeed without producing an artifact.
pub struct ArtifactAbsent {
    label: String,
    input: PathBuf,
    layout: ArtifactLayout,
}

impl ArtifactAbsent {
    pub fn new(input: impl Into<PathBuf>, layout: ArtifactLayout) -> Self {
        let input = input.into();
        Self {
            label: case_label(&input),
            input,
            layout,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }
}

impl TestCase for ArtifactAbsent {
    fn label(&self) -> &str {
        &self.label
    }

    fn run(&self, ctx: &mut CaseContext<'_>) -> HarnessResult<()> {
        invoke_on_input(ctx, &self.input)?;
        let artifact = self.layout.artifact_path(&self.input);
        let unexpected = artifact.exists();
        ctx.assert_false(
            unexpected,
            format!("unexpected file generated: {}", artifact.display()),
        );
        if unexpected {
            remove_artifact(ctx, &artifact);
        }
        Ok(())
    }
}
