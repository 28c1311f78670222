//! Records of completed process executions.

use std::borrow::Cow;
use std::process::{ExitStatus, Output};
use std::time::Duration;

use serde::Serialize;

/// Outcome of one finished process: exit code plus both captured streams.
///
/// Built once from a [`std::process::Output`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    returncode: i32,
    #[serde(serialize_with = "serialize_lossy")]
    stdout: Vec<u8>,
    #[serde(serialize_with = "serialize_lossy")]
    stderr: Vec<u8>,
}

impl Invocation {
    pub fn new(returncode: i32, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            returncode,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Exit code of the process. Signal terminations map to the negated signal number.
    pub fn returncode(&self) -> i32 {
        self.returncode
    }

    pub fn success(&self) -> bool {
        self.returncode == 0
    }

    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

impl From<Output> for Invocation {
    fn from(output: Output) -> Self {
        Self {
            returncode: exit_code(output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| -sig))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// One tool call made by a case: the rendered command line and what it produced.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationLog {
    pub tool: String,
    pub command: Vec<String>,
    pub output: Invocation,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
}

impl InvocationLog {
    /// Command line joined with single spaces, as used for display and substring matching.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

fn serialize_lossy<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

pub(crate) fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}
