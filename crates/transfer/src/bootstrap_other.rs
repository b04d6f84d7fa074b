//! Non-Windows tool bootstrap.
//!
//! PuTTY is expected to come from the system package manager here; the
//! precondition step only verifies the tools can be launched.

use sshdrop_runner::CommandSpec;
use tracing::debug;

use crate::exec::CommandExecutor;
use crate::putty;
use crate::TransferError;

/// Verifies plink/pscp are reachable on PATH.
///
/// Idempotent; callers run it once per process before the first transfer
/// attempt. The exit code of the version probe is irrelevant, only whether
/// the tool could be launched at all.
pub async fn ensure_tools(exec: &dyn CommandExecutor) -> Result<(), TransferError> {
    for tool in [putty::PLINK, putty::PSCP] {
        let output = exec
            .run(CommandSpec::new(tool).arg("-V"))
            .await
            .map_err(|e| TransferError::Bootstrap(format!("{tool} is not runnable: {e}")))?;
        debug!(tool, code = output.exit_code, "tool probe ok");
    }
    Ok(())
}
