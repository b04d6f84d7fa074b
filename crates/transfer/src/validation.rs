//! Local source-file validation.

use std::path::Path;

use crate::TransferError;

/// Validates that `path` names an existing regular file.
///
/// Runs before any remote command is issued, so a bad selection fails fast
/// instead of surfacing as a cryptic copy-tool error.
pub fn validate_source(path: &Path) -> Result<(), TransferError> {
    let meta = std::fs::metadata(path)
        .map_err(|e| TransferError::InvalidSource(format!("{}: {e}", path.display())))?;
    if !meta.is_file() {
        return Err(TransferError::InvalidSource(format!(
            "{}: not a regular file",
            path.display()
        )));
    }
    Ok(())
}
