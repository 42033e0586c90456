//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with guaranteed kill on timeout.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::application::ports::CommandRunner;

/// Production `CommandRunner` on tokio.
///
/// By default no timeout is imposed — a playbook run blocks until the
/// subprocess exits. When a timeout is configured (or passed via
/// `run_with_timeout`), `tokio::select!` with an explicit `child.kill()`
/// guarantees the process is terminated: on some platforms dropping the
/// output future does NOT kill the child.
pub struct TokioCommandRunner {
    timeout: Option<Duration>,
}

impl TokioCommandRunner {
    /// A runner that waits indefinitely for the subprocess.
    #[must_use]
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// A runner that kills the subprocess after `timeout`.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    async fn wait_capture(
        mut child: tokio::process::Child,
        program: &str,
        timeout: Option<Duration>,
    ) -> Result<Output> {
        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        let capture = async {
            let (status, stdout, stderr) = tokio::join!(
                child.wait(),
                async {
                    let mut buf = Vec::new();
                    if let Some(ref mut h) = stdout_handle {
                        let _ = h.read_to_end(&mut buf).await;
                    }
                    buf
                },
                async {
                    let mut buf = Vec::new();
                    if let Some(ref mut h) = stderr_handle {
                        let _ = h.read_to_end(&mut buf).await;
                    }
                    buf
                },
            );
            Ok(Output {
                status: status.with_context(|| format!("waiting for {program}"))?,
                stdout,
                stderr,
            })
        };

        match timeout {
            None => capture.await,
            Some(limit) => {
                tokio::select! {
                    result = capture => result,
                    () = tokio::time::sleep(limit) => {
                        let _ = child.kill().await;
                        anyhow::bail!("{program} timed out after {}s", limit.as_secs())
                    }
                }
            }
        }
    }

    fn spawn(
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<tokio::process::Child> {
        tokio::process::Command::new(program)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<Output> {
        let child = Self::spawn(program, args, env)?;
        Self::wait_capture(child, program, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
        timeout: Duration,
    ) -> Result<Output> {
        let child = Self::spawn(program, args, env)?;
        Self::wait_capture(child, program, Some(timeout)).await
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
