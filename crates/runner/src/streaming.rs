use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::command::{CommandOutput, CommandSpec};
use crate::RunnerError;

/// Runs `spec`, delivering each completed stdout line to `on_line` while the
/// child is still running.
///
/// Lines reach `on_line` in emission order, before the child exits. Stderr
/// is drained concurrently and included in the aggregate output. A non-zero
/// exit is soft-fail: the returned [`CommandOutput`] carries the observed
/// code and captured streams so interrupted transfers still reach the
/// caller's terminal handler with their diagnostics. Only a failed launch is
/// an `Err`, in which case `on_line` was never called.
///
/// Cancelling `cancel` kills the child; the call then returns through the
/// normal exit path with the stdout captured so far. Buffered stderr is
/// dropped on cancellation.
pub async fn run_streaming(
    spec: &CommandSpec,
    cancel: CancellationToken,
    mut on_line: impl FnMut(&str) + Send,
) -> Result<CommandOutput, RunnerError> {
    debug!(program = %spec.program(), "running streaming command");
    let mut child = spec
        .build()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunnerError::Launch {
            program: spec.program().to_string(),
            source,
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| RunnerError::Io(std::io::Error::other("child stdout was not captured")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| RunnerError::Io(std::io::Error::other("child stderr was not captured")))?;

    // Drain stderr on its own task so a chatty child cannot deadlock on a
    // full pipe while we block on stdout lines.
    let stderr_task = tokio::spawn(async move {
        let mut buf = String::new();
        let _ = BufReader::new(stderr).read_to_string(&mut buf).await;
        buf
    });

    let mut lines = BufReader::new(stdout).lines();
    let mut stdout_buf = String::new();
    let mut killed = false;
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    on_line(&line);
                    stdout_buf.push_str(&line);
                    stdout_buf.push('\n');
                }
                None => break,
            },
            _ = cancel.cancelled() => {
                warn!(program = %spec.program(), "cancellation requested, killing child");
                // Kill can race a natural exit; either way the wait below
                // reaps the child.
                let _ = child.start_kill();
                killed = true;
                // Stop reading: a grandchild of the killed process may still
                // hold the pipe open, so waiting for EOF could block forever.
                break;
            }
        }
    }

    let status = child.wait().await?;
    let stderr_buf = if killed {
        stderr_task.abort();
        String::new()
    } else {
        stderr_task.await.unwrap_or_default()
    };

    Ok(CommandOutput {
        exit_code: status.code().unwrap_or(-1),
        stdout: stdout_buf,
        stderr: stderr_buf,
    })
}
