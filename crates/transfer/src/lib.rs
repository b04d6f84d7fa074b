//! Remote-transfer orchestration core for sshdrop.
//!
//! Composes host trust resolution, destination resolution, and a streaming
//! pscp copy into a single pipeline that reports ordered progress events and
//! exactly one terminal result per attempt. The SSH protocol itself is
//! delegated entirely to the PuTTY tools; this crate only drives them and
//! parses their text output.

mod dest;
mod exec;
mod orchestrator;
mod progress;
pub mod putty;
mod trust;
mod types;
mod validation;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(target_os = "windows")]
#[path = "bootstrap_windows.rs"]
pub mod bootstrap;

#[cfg(not(target_os = "windows"))]
#[path = "bootstrap_other.rs"]
pub mod bootstrap;

pub use dest::DestinationResolver;
pub use exec::{CommandExecutor, LineSink, ProcessExecutor};
pub use orchestrator::TransferOrchestrator;
pub use progress::parse_percent;
pub use trust::HostTrustResolver;
pub use types::{Endpoint, Fingerprint, ProgressEvent, Secret, TransferRequest, TransferResult};
pub use validation::validate_source;

/// Errors produced by the transfer crate.
///
/// A copy tool exiting non-zero is deliberately not represented here; that
/// outcome surfaces as a [`TransferResult`] so the boundary can report the
/// exit code and captured diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid source file: {0}")]
    InvalidSource(String),

    #[error("failed to launch copy tool: {0}")]
    CopyLaunch(String),

    #[error("runner error: {0}")]
    Runner(#[from] sshdrop_runner::RunnerError),

    #[error("bootstrap step failed: {0}")]
    Bootstrap(String),

    #[error("cancelled")]
    Cancelled,
}
