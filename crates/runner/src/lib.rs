//! Child-process execution for sshdrop.
//!
//! Two modes: [`run`]/[`run_checked`] capture everything and return once the
//! command has exited; [`run_streaming`] additionally delivers each stdout
//! line to a callback while the child is still running, which is what makes
//! graduated transfer progress observable before completion.

mod command;
mod streaming;

pub use command::{CommandOutput, CommandSpec, run, run_checked};
pub use streaming::run_streaming;

/// Errors produced by the runner crate.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The child process could not be started at all.
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The child exited non-zero while the caller requested hard failure.
    /// Carries everything captured up to that point.
    #[error("{program} exited with code {}", output.exit_code)]
    NonZeroExit {
        program: String,
        output: CommandOutput,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
