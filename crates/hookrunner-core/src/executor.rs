//! Subprocess execution for a single hook.
//!
//! Each check runs as `sh -c <command>` with the event serialized as JSON on
//! stdin (plus `FILE_PATH` / `TOOL_NAME` env vars for older shell-script
//! checks that predate the stdin contract). Output is captured with a hard
//! cap per stream; the per-hook timeout escalates SIGTERM → SIGKILL.

use std::process::Stdio;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};

use crate::classify::{classify, Classification, TIMEOUT_SENTINEL};
use crate::event::LifecycleEvent;
use crate::hook::HookDefinition;

/// Captured bytes per stream before truncation.
pub const MAX_CAPTURE_BYTES: usize = 64 * 1024;

/// Marker appended to a truncated stream.
const TRUNCATION_MARKER: &str = "\n... [output truncated]";

/// Window between SIGTERM and SIGKILL for a timed-out check.
const KILL_GRACE: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// CheckResult
// ---------------------------------------------------------------------------

/// Outcome of running one hook against one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub hook_name: String,
    pub classification: Classification,
    /// Raw exit code, or `TIMEOUT_SENTINEL` when the check was killed for
    /// exceeding its timeout.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

// ---------------------------------------------------------------------------
// execute
// ---------------------------------------------------------------------------

/// Run one hook's command against one event.
///
/// Never fails: a non-zero exit is normal input, a timeout becomes a Warn
/// via the sentinel, and a process that cannot be started at all becomes a
/// Block with synthesized stderr — a check that cannot run must not
/// silently pass.
pub async fn execute(hook: &HookDefinition, event: &LifecycleEvent) -> CheckResult {
    execute_with_shell("sh", hook, event).await
}

/// Inner entry point, parameterized on the shell so tests can force a spawn
/// failure with a nonexistent binary.
pub(crate) async fn execute_with_shell(
    shell: &str,
    hook: &HookDefinition,
    event: &LifecycleEvent,
) -> CheckResult {
    let start = Instant::now();
    let payload = event.stdin_payload().to_string();

    let mut cmd = Command::new(shell);
    cmd.arg("-c")
        .arg(&hook.command)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env("TOOL_NAME", event.tool_name.as_deref().unwrap_or(""))
        .env("FILE_PATH", event.file_path.as_deref().unwrap_or(""));

    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(hook = %hook.name, error = %e, "failed to spawn check");
            // Infrastructure failure, not a check verdict: Block regardless
            // of exit-code contract so a missing interpreter can't pass.
            return CheckResult {
                hook_name: hook.name.clone(),
                classification: Classification::Block,
                exit_code: 127,
                stdout: String::new(),
                stderr: format!("failed to spawn '{}': {e}", hook.command),
                duration_ms: start.elapsed().as_millis() as u64,
            };
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(payload.as_bytes()).await;
        let _ = stdin.shutdown().await;
    }

    // Drain both streams in their own tasks so a chatty check can't deadlock
    // on a full pipe while we wait for it to exit.
    let stdout_task = tokio::spawn(read_capped(child.stdout.take()));
    let stderr_task = tokio::spawn(read_capped(child.stderr.take()));

    let timeout = Duration::from_millis(hook.timeout_ms);
    let exit_code = match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) => exit_status_code(status),
        Ok(Err(e)) => {
            tracing::warn!(hook = %hook.name, error = %e, "wait on check failed");
            let (stdout, stderr) = join_readers(stdout_task, stderr_task).await;
            return CheckResult {
                hook_name: hook.name.clone(),
                classification: Classification::Block,
                exit_code: 127,
                stdout,
                stderr: format!("failed to reap check process: {e}"),
                duration_ms: start.elapsed().as_millis() as u64,
            };
        }
        Err(_) => {
            tracing::debug!(
                hook = %hook.name,
                timeout_ms = hook.timeout_ms,
                "check timed out, terminating"
            );
            terminate(&mut child).await;
            TIMEOUT_SENTINEL
        }
    };

    let (stdout, stderr) = join_readers(stdout_task, stderr_task).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    CheckResult {
        hook_name: hook.name.clone(),
        classification: classify(exit_code),
        exit_code,
        stdout,
        stderr,
        duration_ms,
    }
}

/// SIGTERM, a grace window, then SIGKILL. Uses the external `kill` command
/// for the TERM so the check gets a chance to clean up; the final kill goes
/// through tokio, which also reaps the child.
async fn terminate(child: &mut Child) {
    if let Some(pid) = child.id() {
        let _ = Command::new("kill")
            .arg(pid.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        if tokio::time::timeout(KILL_GRACE, child.wait()).await.is_ok() {
            return;
        }
    }
    let _ = child.kill().await;
    let _ = child.wait().await;
}

/// Exit code of a finished process. On Unix, death by signal has no code;
/// use the shell convention of 128 + signal number (never 0 or 2, so it
/// classifies as Warn).
fn exit_status_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128 + sig;
        }
    }
    TIMEOUT_SENTINEL
}

/// Read a stream to EOF, keeping at most `MAX_CAPTURE_BYTES`. The stream is
/// always drained fully so the child never blocks on a full pipe.
async fn read_capped<R: tokio::io::AsyncRead + Unpin>(reader: Option<R>) -> String {
    let Some(mut reader) = reader else {
        return String::new();
    };

    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 8192];
    let mut truncated = false;

    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                if buf.len() < MAX_CAPTURE_BYTES {
                    let take = n.min(MAX_CAPTURE_BYTES - buf.len());
                    buf.extend_from_slice(&chunk[..take]);
                    if take < n {
                        truncated = true;
                    }
                } else {
                    truncated = true;
                }
            }
            Err(_) => break,
        }
    }

    let mut text = String::from_utf8_lossy(&buf).into_owned();
    if truncated {
        text.push_str(TRUNCATION_MARKER);
    }
    text
}

async fn join_readers(
    stdout_task: tokio::task::JoinHandle<String>,
    stderr_task: tokio::task::JoinHandle<String>,
) -> (String, String) {
    let stdout = stdout_task.await.unwrap_or_default();
    let stderr = stderr_task.await.unwrap_or_default();
    (stdout, stderr)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
