//! Remote destination resolution.

use tracing::{debug, warn};

use crate::exec::CommandExecutor;
use crate::putty;
use crate::types::{Endpoint, Fingerprint};

/// Expands a home-relative destination into an absolute remote path.
///
/// pscp does not reliably expand `~` across remote operating systems, so
/// the home directory is queried out-of-band with plink and the path is
/// assembled locally.
pub struct DestinationResolver<'a> {
    exec: &'a dyn CommandExecutor,
}

impl<'a> DestinationResolver<'a> {
    pub fn new(exec: &'a dyn CommandExecutor) -> Self {
        Self { exec }
    }

    /// Resolves `symbolic` against the endpoint's home directory.
    ///
    /// A destination not starting with `~` is returned unchanged without
    /// issuing any remote command. If the home-directory query fails or
    /// returns nothing usable, the original symbolic form is returned and
    /// the copy stage is left to report the real error.
    pub async fn resolve(
        &self,
        endpoint: &Endpoint,
        fingerprint: Option<&Fingerprint>,
        symbolic: &str,
    ) -> String {
        if !symbolic.starts_with('~') {
            return symbolic.to_string();
        }

        let output = match self.exec.run(putty::home_dir(endpoint, fingerprint)).await {
            Ok(output) if output.success() => output,
            Ok(output) => {
                warn!(
                    host = %endpoint.host,
                    code = output.exit_code,
                    "home query exited non-zero, keeping symbolic destination"
                );
                return symbolic.to_string();
            }
            Err(e) => {
                warn!(host = %endpoint.host, error = %e, "home query failed to run");
                return symbolic.to_string();
            }
        };

        let home = output.stdout.trim();
        if home.is_empty() {
            warn!(host = %endpoint.host, "home query returned empty output");
            return symbolic.to_string();
        }

        let resolved = format!("{home}/{}", tail_segment(symbolic));
        debug!(host = %endpoint.host, destination = %resolved, "destination resolved");
        resolved
    }
}

/// Final `/`-delimited segment of a symbolic destination; the trailing-slash
/// form takes the segment before the slash, not the empty one after it.
fn tail_segment(dest: &str) -> &str {
    let trimmed = dest.strip_suffix('/').unwrap_or(dest);
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
