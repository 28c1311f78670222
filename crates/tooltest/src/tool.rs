//! Invocable tool wrapper.
//!
//! A [`Tool`] pairs a [`CommandTemplate`] with environment overrides. The
//! template is plain data: literal tokens plus two named insertion points for
//! the per-call [`ToolArgs`]. Rendering a template is a pure function, so the
//! exact command line of any call can be inspected without running anything.
//!
//! ## Example
//!
//! ```
//! use tooltest::{CommandTemplate, Tool, ToolArgs};
//!
//! // rewriter <inputs...> -- -std=c++0x -w <trailing...>
//! let template = CommandTemplate::new("rewriter")
//!     .inputs()
//!     .literal("--")
//!     .literals(["-std=c++0x", "-w"])
//!     .trailing();
//! let tool = Tool::new("rewriter", template).with_env("REWRITE_TRACE", "1");
//!
//! let args = ToolArgs::new().input("a.cpp");
//! assert_eq!(
//!     tool.command_line(&args).unwrap(),
//!     ["rewriter", "a.cpp", "--", "-std=c++0x", "-w"]
//! );
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use crate::error::{HarnessError, HarnessResult};
use crate::invocation::{Invocation, InvocationLog};

// ============================================================================
// Command template
// ============================================================================

/// One element of a command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    /// A fixed token emitted verbatim.
    Literal(String),
    /// Insertion point for [`ToolArgs::inputs`].
    Inputs,
    /// Insertion point for [`ToolArgs::trailing`].
    Trailing,
}

/// Ordered command template: the program name followed by tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandTemplate {
    tokens: Vec<TemplateToken>,
}

impl CommandTemplate {
    /// Start a template whose first token is `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            tokens: vec![TemplateToken::Literal(program.into())],
        }
    }

    pub fn literal(mut self, token: impl Into<String>) -> Self {
        self.tokens.push(TemplateToken::Literal(token.into()));
        self
    }

    pub fn literals<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens
            .extend(tokens.into_iter().map(|t| TemplateToken::Literal(t.into())));
        self
    }

    pub fn inputs(mut self) -> Self {
        self.tokens.push(TemplateToken::Inputs);
        self
    }

    pub fn trailing(mut self) -> Self {
        self.tokens.push(TemplateToken::Trailing);
        self
    }

    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// Render the full token sequence for one call.
    ///
    /// An insertion point that appears more than once is expanded each time.
    pub fn render(&self, args: &ToolArgs) -> Vec<String> {
        let mut out = Vec::with_capacity(self.tokens.len() + args.inputs.len() + args.trailing.len());
        for token in &self.tokens {
            match token {
                TemplateToken::Literal(s) => out.push(s.clone()),
                TemplateToken::Inputs => out.extend(args.inputs.iter().cloned()),
                TemplateToken::Trailing => out.extend(args.trailing.iter().cloned()),
            }
        }
        out
    }
}

/// Per-call arguments: positional inputs and flags that go after the separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolArgs {
    pub inputs: Vec<String>,
    pub trailing: Vec<String>,
}

impl ToolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, input: impl AsRef<Path>) -> Self {
        self.inputs.push(input.as_ref().to_string_lossy().into_owned());
        self
    }

    pub fn trailing_flag(mut self, flag: impl Into<String>) -> Self {
        self.trailing.push(flag.into());
        self
    }
}

// ============================================================================
// Tool
// ============================================================================

/// A command-line program the harness can invoke.
///
/// Immutable once built; calls share no state.
#[derive(Debug, Clone)]
pub struct Tool {
    name: String,
    template: CommandTemplate,
    env: BTreeMap<String, String>,
    working_dir: Option<PathBuf>,
}

impl Tool {
    pub fn new(name: impl Into<String>, template: CommandTemplate) -> Self {
        Self {
            name: name.into(),
            template,
            env: BTreeMap::new(),
            working_dir: None,
        }
    }

    /// Add an environment override, layered on top of the inherited environment.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &CommandTemplate {
        &self.template
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn command_line(&self, args: &ToolArgs) -> HarnessResult<Vec<String>> {
        let command = self.template.render(args);
        if command.is_empty() {
            return Err(HarnessError::EmptyTemplate(self.name.clone()));
        }
        Ok(command)
    }

    /// Run the tool to completion and capture its exit code and output.
    ///
    /// A non-zero exit code is an ordinary result. Failing to start the
    /// program at all is a [`HarnessError::Spawn`].
    #[tracing::instrument(skip_all, fields(tool = %self.name))]
    pub fn call(&self, args: &ToolArgs) -> HarnessResult<InvocationLog> {
        let command = self.command_line(args)?;
        tracing::debug!(command = %command.join(" "), "invoking tool");

        let (program, rest) = command
            .split_first()
            .ok_or_else(|| HarnessError::EmptyTemplate(self.name.clone()))?;

        let mut cmd = Command::new(program);
        cmd.args(rest).envs(&self.env).stdin(Stdio::null());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let start = Instant::now();
        let output = cmd.output().map_err(|source| HarnessError::Spawn {
            tool: self.name.clone(),
            program: program.clone(),
            source,
        })?;
        let duration = start.elapsed();

        let output = Invocation::from(output);
        tracing::debug!(returncode = output.returncode(), ?duration, "tool finished");

        Ok(InvocationLog {
            tool: self.name.clone(),
            command,
            output,
            duration,
        })
    }
}
