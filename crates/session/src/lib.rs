//! Boundary adapter between the transfer core and an interactive caller.
//!
//! A [`TransferSession`] runs one orchestration attempt on a dedicated
//! tokio task and republishes progress and the terminal outcome as discrete
//! [`SessionEvent`]s on a single ordered channel, so a UI shell or CLI
//! stays responsive while the multi-step pipeline runs.

use std::sync::Arc;

use serde::Serialize;
use sshdrop_transfer::{
    CommandExecutor, ProgressEvent, TransferOrchestrator, TransferRequest, TransferResult,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::error;

/// Events republished to the boundary collaborator.
///
/// Exactly one terminal variant (`Finished` or `Failed`) is delivered per
/// attempt, strictly after the last `Progress`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// One copy-tool output line, in subprocess emission order.
    Progress(ProgressEvent),
    /// The attempt ran to subprocess termination; the carried exit code
    /// distinguishes success (0) from copy failure.
    Finished(TransferResult),
    /// The attempt could not run the copy tool at all.
    Failed { error: String },
}

/// One in-flight transfer attempt on its own worker task.
///
/// The caller's context only touches the event channel and the join
/// handle; all subprocess waits happen on the worker. Attempts share no
/// mutable state, so independent sessions may run concurrently.
pub struct TransferSession {
    events_rx: Option<mpsc::UnboundedReceiver<SessionEvent>>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl TransferSession {
    /// Starts the attempt on a dedicated worker task.
    pub fn spawn(exec: Arc<dyn CommandExecutor>, request: TransferRequest) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let orchestrator = TransferOrchestrator::new(exec);
        let cancel = orchestrator.cancel_token();

        let handle = tokio::spawn(async move {
            let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<ProgressEvent>();
            let forward_tx = events_tx.clone();
            let forwarder = tokio::spawn(async move {
                while let Some(event) = progress_rx.recv().await {
                    if forward_tx.send(SessionEvent::Progress(event)).is_err() {
                        break;
                    }
                }
            });

            let result = orchestrator.execute(&request, progress_tx).await;
            // The progress sender lives inside the orchestrator's line
            // callback, which is gone once execute returns; the forwarder
            // drains whatever is left and exits. Awaiting it keeps the
            // terminal event strictly after the last progress event.
            let _ = forwarder.await;

            let terminal = match result {
                Ok(result) => SessionEvent::Finished(result),
                Err(e) => {
                    error!(error = %e, "transfer attempt failed");
                    SessionEvent::Failed {
                        error: e.to_string(),
                    }
                }
            };
            let _ = events_tx.send(terminal);
        });

        Self {
            events_rx: Some(events_rx),
            cancel,
            handle,
        }
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<SessionEvent>> {
        self.events_rx.take()
    }

    /// Cancellation hook: kills the copy subprocess and unblocks the
    /// worker. Boundaries that hide their cancel affordance simply never
    /// call this.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// True once the worker task has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker task to finish.
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}
