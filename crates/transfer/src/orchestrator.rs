//! Transfer pipeline: trust → destination → streaming copy.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::dest::DestinationResolver;
use crate::exec::{CommandExecutor, LineSink};
use crate::progress::parse_percent;
use crate::putty;
use crate::trust::HostTrustResolver;
use crate::types::{ProgressEvent, TransferRequest, TransferResult};
use crate::validation::validate_source;
use crate::TransferError;

/// Drives one transfer attempt end to end.
///
/// Failures before the copy stage degrade and proceed: an unobtainable
/// fingerprint means an unpinned copy, a failed home-directory query means
/// the symbolic destination is used as-is. Only a failure to launch the
/// copy tool (or cancellation) aborts the attempt with an error.
pub struct TransferOrchestrator {
    exec: Arc<dyn CommandExecutor>,
    cancel: CancellationToken,
}

impl TransferOrchestrator {
    pub fn new(exec: Arc<dyn CommandExecutor>) -> Self {
        Self {
            exec,
            cancel: CancellationToken::new(),
        }
    }

    /// Returns the cancellation token for this attempt.
    ///
    /// Cancelling kills the copy subprocess; the attempt then terminates
    /// through its normal result path.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs the full pipeline for `request`.
    ///
    /// Each copy-tool output line is forwarded on `events_tx` as a
    /// [`ProgressEvent`], in emission order, before this call returns. The
    /// returned [`TransferResult`] reports the copy tool's exit code even
    /// when it is non-zero; interrupted transfers still reach the caller's
    /// terminal handler with their diagnostics.
    pub async fn execute(
        &self,
        request: &TransferRequest,
        events_tx: mpsc::UnboundedSender<ProgressEvent>,
    ) -> Result<TransferResult, TransferError> {
        validate_source(&request.local_path)?;
        self.check_cancelled()?;

        let endpoint = &request.endpoint;
        debug!(host = %endpoint.host, "resolving host trust");
        let fingerprint = HostTrustResolver::new(self.exec.as_ref())
            .resolve_fingerprint(endpoint)
            .await;
        self.check_cancelled()?;

        debug!(
            host = %endpoint.host,
            destination = %request.remote_destination,
            "resolving destination"
        );
        let destination = DestinationResolver::new(self.exec.as_ref())
            .resolve(endpoint, fingerprint.as_ref(), &request.remote_destination)
            .await;
        self.check_cancelled()?;

        info!(
            host = %endpoint.host,
            source = %request.local_path.display(),
            destination = %destination,
            pinned = fingerprint.is_some(),
            "starting copy"
        );
        let spec = putty::copy(
            endpoint,
            fingerprint.as_ref(),
            &request.local_path,
            &destination,
        );
        let on_line: LineSink = Box::new(move |line: &str| {
            let _ = events_tx.send(ProgressEvent {
                raw_line: line.to_string(),
                percent: parse_percent(line),
            });
        });
        let output = self
            .exec
            .run_streaming(spec, self.cancel.clone(), on_line)
            .await
            .map_err(|e| match e {
                sshdrop_runner::RunnerError::Launch { .. } => {
                    TransferError::CopyLaunch(e.to_string())
                }
                other => TransferError::Runner(other),
            })?;

        if output.success() {
            info!(host = %endpoint.host, "copy finished");
        } else {
            warn!(host = %endpoint.host, code = output.exit_code, "copy exited non-zero");
        }

        Ok(TransferResult {
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn check_cancelled(&self) -> Result<(), TransferError> {
        if self.cancel.is_cancelled() {
            Err(TransferError::Cancelled)
        } else {
            Ok(())
        }
    }
}
