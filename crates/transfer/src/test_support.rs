//! Test doubles for the executor seam.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use sshdrop_runner::{CommandOutput, CommandSpec, RunnerError};
use tokio_util::sync::CancellationToken;

use crate::exec::{CommandExecutor, LineSink};

/// Scripted [`CommandExecutor`]: `run` responses are consumed in order,
/// streaming plays back a fixed set of lines. Every received spec is
/// recorded for assertions.
pub struct MockExec {
    pub run_responses: Mutex<Vec<Result<CommandOutput, RunnerError>>>,
    pub run_specs: Mutex<Vec<CommandSpec>>,
    pub stream_lines: Vec<String>,
    pub stream_response: Mutex<Option<Result<CommandOutput, RunnerError>>>,
    pub stream_specs: Mutex<Vec<CommandSpec>>,
}

impl MockExec {
    pub fn new() -> Self {
        Self {
            run_responses: Mutex::new(Vec::new()),
            run_specs: Mutex::new(Vec::new()),
            stream_lines: Vec::new(),
            stream_response: Mutex::new(None),
            stream_specs: Mutex::new(Vec::new()),
        }
    }

    /// Queues one successful `run` response with the given streams.
    pub fn run_ok(self, stdout: &str, stderr: &str) -> Self {
        self.run_exit(0, stdout, stderr)
    }

    /// Queues one `run` response with an explicit exit code.
    pub fn run_exit(self, exit_code: i32, stdout: &str, stderr: &str) -> Self {
        self.run_responses.lock().unwrap().push(Ok(CommandOutput {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }));
        self
    }

    /// Sets the lines played back by `run_streaming` and its final output.
    pub fn stream(mut self, lines: &[&str], exit_code: i32, stderr: &str) -> Self {
        self.stream_lines = lines.iter().map(|l| l.to_string()).collect();
        let stdout: String = lines.iter().map(|l| format!("{l}\n")).collect();
        *self.stream_response.lock().unwrap() = Some(Ok(CommandOutput {
            exit_code,
            stdout,
            stderr: stderr.into(),
        }));
        self
    }

    /// Makes `run_streaming` fail as if the copy tool could not be spawned.
    pub fn stream_launch_failure(self) -> Self {
        *self.stream_response.lock().unwrap() = Some(Err(launch_error()));
        self
    }
}

fn launch_error() -> RunnerError {
    RunnerError::Launch {
        program: "mock".into(),
        source: std::io::Error::other("no scripted response"),
    }
}

impl CommandExecutor for MockExec {
    fn run(
        &self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, RunnerError>> + Send + '_>> {
        Box::pin(async move {
            self.run_specs.lock().unwrap().push(spec);
            let mut responses = self.run_responses.lock().unwrap();
            if responses.is_empty() {
                Err(launch_error())
            } else {
                responses.remove(0)
            }
        })
    }

    fn run_streaming(
        &self,
        spec: CommandSpec,
        _cancel: CancellationToken,
        mut on_line: LineSink,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, RunnerError>> + Send + '_>> {
        Box::pin(async move {
            self.stream_specs.lock().unwrap().push(spec);
            match self.stream_response.lock().unwrap().take() {
                Some(Ok(output)) => {
                    for line in &self.stream_lines {
                        on_line(line);
                    }
                    Ok(output)
                }
                Some(Err(e)) => Err(e),
                None => Err(launch_error()),
            }
        })
    }
}
