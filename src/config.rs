//! Harness configuration.
//!
//! Defaults describe the standard rewriter fixture layout; the CLI overrides
//! individual fields through the `with_*` setters.

use std::path::{Path, PathBuf};

use tooltest::{ArtifactLayout, HarnessError, HarnessResult, SelectionPolicy};

/// Flags passed to the tool after the `--` separator unless overridden.
pub const DEFAULT_TOOL_FLAGS: [&str; 2] = ["-std=c++0x", "-w"];

/// Environment variable that switches the tool into trace mode.
pub const DEFAULT_TRACE_VAR: &str = "REWRITE_TRACE";

/// Output format of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Console,
    Json,
}

/// Everything needed to build and run the conformance suite.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Executable under test
    pub tool_path: PathBuf,
    /// Directory holding the fixture category directories
    pub input_dir: PathBuf,
    /// Extension of fixture inputs, without the dot
    pub extension: String,
    /// Artifact and reference naming
    pub layout: ArtifactLayout,
    /// Flags placed after `--` on every tool invocation
    pub tool_flags: Vec<String>,
    /// Environment variable set to `1` for every tool invocation
    pub trace_var: String,
    /// Program used to compare artifacts with reference files
    pub diff_program: String,
    pub policy: SelectionPolicy,
    pub stop_on_fail: bool,
    pub verbose: bool,
    pub format: ReportFormat,
    pub color: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            tool_path: PathBuf::from("./rewriter"),
            input_dir: PathBuf::from("testing/input"),
            extension: "cpp".to_string(),
            layout: ArtifactLayout::default(),
            tool_flags: DEFAULT_TOOL_FLAGS.iter().map(|s| s.to_string()).collect(),
            trace_var: DEFAULT_TRACE_VAR.to_string(),
            diff_program: "diff".to_string(),
            policy: SelectionPolicy::default(),
            stop_on_fail: false,
            verbose: false,
            format: ReportFormat::Console,
            color: true,
        }
    }
}

impl HarnessConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tool_path = path.into();
        self
    }

    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = ext.into();
        self
    }

    pub fn with_layout(mut self, layout: ArtifactLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_tool_flags(mut self, flags: Vec<String>) -> Self {
        self.tool_flags = flags;
        self
    }

    pub fn with_trace_var(mut self, var: impl Into<String>) -> Self {
        self.trace_var = var.into();
        self
    }

    pub fn with_diff_program(mut self, program: impl Into<String>) -> Self {
        self.diff_program = program.into();
        self
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_stop_on_fail(mut self, stop: bool) -> Self {
        self.stop_on_fail = stop;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Check paths and names before any case runs.
    ///
    /// ## Errors
    ///
    /// Returns [`HarnessError::Config`] if:
    /// - the tool path does not exist or is not a file
    /// - the input directory does not exist
    /// - the extension, either suffix or the trace variable is empty
    pub fn validate(&self) -> HarnessResult<()> {
        check_file(&self.tool_path, "tool")?;
        if !self.input_dir.is_dir() {
            return Err(HarnessError::config(format!(
                "input directory '{}' does not exist",
                self.input_dir.display()
            )));
        }
        for (value, what) in [
            (&self.extension, "fixture extension"),
            (&self.layout.artifact_suffix, "artifact suffix"),
            (&self.layout.reference_suffix, "reference suffix"),
            (&self.trace_var, "trace variable"),
        ] {
            if value.is_empty() {
                return Err(HarnessError::config(format!("{what} must not be empty")));
            }
        }
        if self.layout.artifact_suffix == self.layout.reference_suffix {
            return Err(HarnessError::config(
                "artifact suffix and reference suffix must differ; cleanup would delete the reference files",
            ));
        }
        Ok(())
    }
}

fn check_file(path: &Path, what: &str) -> HarnessResult<()> {
    match path.metadata() {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(HarnessError::config(format!("{what} path '{}' is not a file", path.display()))),
        Err(_) => Err(HarnessError::config(format!("{what} path '{}' does not exist", path.display()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Default config tests
    // ========================================

    #[test]
    fn test_default_flags_and_trace_var() {
        let config = HarnessConfig::default();
        assert_eq!(config.tool_flags, ["-std=c++0x", "-w"]);
        assert_eq!(config.trace_var, "REWRITE_TRACE");
        assert_eq!(config.diff_program, "diff");
        assert_eq!(config.extension, "cpp");
    }

    #[test]
    fn test_default_layout() {
        let config = HarnessConfig::default();
        assert_eq!(config.layout.artifact_suffix, "generated");
        assert_eq!(config.layout.reference_suffix, "fixed");
    }

    // ========================================
    // Validation tests
    // ========================================

    #[test]
    fn test_missing_tool_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::new()
            .with_tool_path(dir.path().join("nope"))
            .with_input_dir(dir.path());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, HarnessError::Config(ref m) if m.contains("does not exist")));
    }

    #[test]
    fn test_directory_as_tool_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::new()
            .with_tool_path(dir.path())
            .with_input_dir(dir.path());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, HarnessError::Config(ref m) if m.contains("is not a file")));
    }

    #[test]
    fn test_missing_input_dir_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("rewriter");
        std::fs::write(&tool, "").unwrap();
        let config = HarnessConfig::new()
            .with_tool_path(&tool)
            .with_input_dir(dir.path().join("missing"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_equal_suffixes_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("rewriter");
        std::fs::write(&tool, "").unwrap();
        let config = HarnessConfig::new()
            .with_tool_path(&tool)
            .with_input_dir(dir.path())
            .with_layout(ArtifactLayout::new("fixed", "fixed"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("rewriter");
        std::fs::write(&tool, "").unwrap();
        let config = HarnessConfig::new().with_tool_path(&tool).with_input_dir(dir.path());
        assert!(config.validate().is_ok());
    }
}
