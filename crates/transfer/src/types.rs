//! Data model for one transfer attempt.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Opaque login credential.
///
/// `Debug` output is redacted; the raw value is only reachable through
/// [`expose`](Secret::expose), at the point it is handed to a child-process
/// argument vector.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw credential.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Login identity for one remote host.
///
/// Immutable for the duration of a single transfer attempt; never persisted
/// by the core.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub username: String,
    pub host: String,
    pub secret: Secret,
}

impl Endpoint {
    pub fn new(username: impl Into<String>, host: impl Into<String>, secret: Secret) -> Self {
        Self {
            username: username.into(),
            host: host.into(),
            secret,
        }
    }

    /// The `user@host` form used by the PuTTY tools.
    pub fn user_at_host(&self) -> String {
        format!("{}@{}", self.username, self.host)
    }
}

/// Host-key fingerprint token as reported by plink (`SHA256:…`).
///
/// Owned transiently by one transfer attempt; not cached across attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One file-delivery attempt: what to copy, where to, as whom.
///
/// `remote_destination` is symbolic: it may be absolute or `~`-relative;
/// resolution happens during orchestration.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub endpoint: Endpoint,
    pub local_path: PathBuf,
    pub remote_destination: String,
}

/// One line of copy-tool output, with the percentage extracted when the line
/// matched the progress shape.
///
/// Events are produced in subprocess emission order; the sequence is finite
/// and ends when the subprocess exits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub raw_line: String,
    pub percent: Option<u8>,
}

/// Terminal outcome of one transfer attempt.
///
/// Produced if and only if the copy subprocess terminated; exactly one
/// exists per attempt. Exit code 0 is success, anything else is failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TransferResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
