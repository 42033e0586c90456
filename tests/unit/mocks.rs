//! Shared mock infrastructure for unit tests.
//!
//! Provides a recording [`CommandRunner`] and canned `Output` helpers so
//! each test file doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used)]

use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use crucible_provisioner::application::ports::CommandRunner;

// ── Output helpers ────────────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn failed_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(code << 8),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Recording runner ──────────────────────────────────────────────────────────

/// One recorded subprocess invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

/// A `CommandRunner` that records every invocation and returns a
/// configurable canned result.
///
/// Thread-safe via `Arc<Mutex<…>>` so clones share the same call log.
#[derive(Clone)]
pub struct MockCommandRunner {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    result: Arc<dyn Fn() -> Result<Output> + Send + Sync>,
}

impl MockCommandRunner {
    /// A mock that always succeeds with empty output.
    pub fn new_ok() -> Self {
        Self::with_result(|| Ok(ok_output(b"")))
    }

    /// A mock that always succeeds with the given stdout.
    pub fn new_ok_with_stdout(stdout: &'static [u8]) -> Self {
        Self::with_result(move || Ok(ok_output(stdout)))
    }

    /// A mock whose subprocess exits non-zero with the given stderr.
    pub fn new_failed(code: i32, stderr: &'static [u8]) -> Self {
        Self::with_result(move || Ok(failed_output(code, stderr)))
    }

    /// A mock whose spawn itself fails with the given message.
    pub fn new_err(msg: &'static str) -> Self {
        Self::with_result(move || anyhow::bail!("{msg}"))
    }

    fn with_result(result: impl Fn() -> Result<Output> + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result: Arc::new(result),
        }
    }

    /// A snapshot of all recorded calls.
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mutex poisoned").clone()
    }
}

impl CommandRunner for MockCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<Output> {
        self.calls.lock().expect("mutex poisoned").push(RecordedCall {
            program: program.to_owned(),
            args: args.to_vec(),
            env: env.to_vec(),
        });
        (self.result)()
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
        _timeout: Duration,
    ) -> Result<Output> {
        self.run(program, args, env).await
    }
}
