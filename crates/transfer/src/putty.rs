//! Structured argv builders for the PuTTY command-line tools.
//!
//! Every invocation is a plain argument vector handed to the launch
//! primitive. Secrets are never interpolated into a shell string.

use std::path::Path;

use sshdrop_runner::CommandSpec;

use crate::types::{Endpoint, Fingerprint};

/// Transport tool: remote command execution and host-key probes.
pub const PLINK: &str = "plink";
/// Transfer tool: the actual file copy.
pub const PSCP: &str = "pscp";

/// Trust probe: a batch-mode connection whose output reveals the host-key
/// fingerprint of an unrecognized host.
pub fn probe(endpoint: &Endpoint) -> CommandSpec {
    CommandSpec::new(PLINK)
        .arg("-batch")
        .arg("-ssh")
        .arg(endpoint.user_at_host())
        .arg("-pw")
        .arg(endpoint.secret.expose())
}

/// Home-directory query: runs `cd ~ && pwd` on the remote side, pinned to
/// `fingerprint` when one was resolved.
pub fn home_dir(endpoint: &Endpoint, fingerprint: Option<&Fingerprint>) -> CommandSpec {
    let mut spec = CommandSpec::new(PLINK).arg("-batch").arg("-ssh");
    if let Some(fp) = fingerprint {
        spec = spec.arg("-hostkey").arg(fp.as_str());
    }
    spec.arg(endpoint.user_at_host())
        .arg("-pw")
        .arg(endpoint.secret.expose())
        .arg("cd ~ && pwd")
}

/// Copy invocation: pscp with the destination in `user@host:path` form.
pub fn copy(
    endpoint: &Endpoint,
    fingerprint: Option<&Fingerprint>,
    local_path: &Path,
    destination: &str,
) -> CommandSpec {
    let mut spec = CommandSpec::new(PSCP).arg("-batch");
    if let Some(fp) = fingerprint {
        spec = spec.arg("-hostkey").arg(fp.as_str());
    }
    spec.arg("-pw")
        .arg(endpoint.secret.expose())
        .arg(local_path.to_string_lossy().into_owned())
        .arg(format!("{}:{}", endpoint.user_at_host(), destination))
}
