//! Host-key fingerprint acquisition.

use tracing::{debug, warn};

use crate::exec::CommandExecutor;
use crate::putty;
use crate::types::{Endpoint, Fingerprint};

/// Obtains the remote host-key fingerprint before any data-bearing command
/// is issued against the endpoint.
pub struct HostTrustResolver<'a> {
    exec: &'a dyn CommandExecutor,
}

impl<'a> HostTrustResolver<'a> {
    pub fn new(exec: &'a dyn CommandExecutor) -> Self {
        Self { exec }
    }

    /// Probes the endpoint and extracts its host-key fingerprint.
    ///
    /// Extraction rule: the fingerprint is the last whitespace-delimited
    /// token of the last output line containing `SHA256`, with stderr
    /// checked before stdout (plink prints the host-key warning on stderr).
    /// Any other output shape yields `None`. Absence means "proceed without
    /// host-key pinning" — the copy tool may still run its own trust prompt
    /// — so this never fails the attempt.
    pub async fn resolve_fingerprint(&self, endpoint: &Endpoint) -> Option<Fingerprint> {
        let output = match self.exec.run(putty::probe(endpoint)).await {
            Ok(output) => output,
            Err(e) => {
                warn!(host = %endpoint.host, error = %e, "trust probe failed to run");
                return None;
            }
        };

        let found = extract_fingerprint(&output.stderr)
            .or_else(|| extract_fingerprint(&output.stdout));
        match found {
            Some(fp) => {
                debug!(host = %endpoint.host, fingerprint = %fp, "resolved host fingerprint");
                Some(fp)
            }
            None => {
                warn!(host = %endpoint.host, "no fingerprint in probe output, proceeding unpinned");
                None
            }
        }
    }
}

/// Trailing token of the last line in `text` containing `SHA256`.
fn extract_fingerprint(text: &str) -> Option<Fingerprint> {
    let line = text.lines().rev().find(|line| line.contains("SHA256"))?;
    let token = line.split_whitespace().next_back()?;
    Some(Fingerprint::new(token))
}
