//! Executor seam between the orchestration core and real child processes.
//!
//! Resolvers and the orchestrator run against this trait, so their logic is
//! testable with mocks that never spawn anything.

use std::future::Future;
use std::pin::Pin;

use sshdrop_runner::{CommandOutput, CommandSpec, RunnerError, run, run_streaming};
use tokio_util::sync::CancellationToken;

/// Sink receiving each stdout line of a streaming command.
pub type LineSink = Box<dyn FnMut(&str) + Send>;

/// Abstract command-execution surface.
pub trait CommandExecutor: Send + Sync {
    /// Runs a command to completion; non-zero exit is soft-fail.
    fn run(
        &self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, RunnerError>> + Send + '_>>;

    /// Runs a command, streaming each stdout line to `on_line` before the
    /// child exits.
    fn run_streaming(
        &self,
        spec: CommandSpec,
        cancel: CancellationToken,
        on_line: LineSink,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, RunnerError>> + Send + '_>>;
}

/// [`CommandExecutor`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn run(
        &self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, RunnerError>> + Send + '_>> {
        Box::pin(async move { run(&spec).await })
    }

    fn run_streaming(
        &self,
        spec: CommandSpec,
        cancel: CancellationToken,
        on_line: LineSink,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, RunnerError>> + Send + '_>> {
        Box::pin(async move { run_streaming(&spec, cancel, on_line).await })
    }
}
