//! Windows tool bootstrap: scoop and PuTTY.
//!
//! An idempotent precondition step, separate from orchestration. Callers
//! run it once per process before the first transfer attempt; the
//! orchestrator assumes it has already been satisfied.

use std::path::PathBuf;

use sshdrop_runner::CommandSpec;
use tracing::{debug, info};

use crate::exec::CommandExecutor;
use crate::TransferError;

/// Ensures plink/pscp are installed and runnable.
///
/// Every step checks for its effect first and is skipped when already
/// satisfied: the execution policy and console encoding are re-applied
/// (both are idempotent), scoop and PuTTY are installed only when their
/// directories are missing.
pub async fn ensure_tools(exec: &dyn CommandExecutor) -> Result<(), TransferError> {
    run_step(
        exec,
        powershell("Set-ExecutionPolicy -ExecutionPolicy RemoteSigned -Scope CurrentUser -Force"),
        "set execution policy",
    )
    .await?;

    let home = home_dir()?;
    if home.join("scoop").exists() {
        debug!("scoop already installed");
    } else {
        info!("installing scoop");
        run_step(exec, powershell("irm get.scoop.sh | iex"), "install scoop").await?;
    }

    if home.join("scoop").join("apps").join("putty").exists() {
        debug!("putty already installed");
    } else {
        info!("installing putty");
        run_step(exec, powershell("scoop install putty"), "install putty").await?;
    }

    run_step(
        exec,
        powershell("[Console]::OutputEncoding = [System.Text.Encoding]::UTF8"),
        "set console encoding",
    )
    .await
}

fn powershell(command: &str) -> CommandSpec {
    CommandSpec::new("powershell").arg("-Command").arg(command)
}

fn home_dir() -> Result<PathBuf, TransferError> {
    std::env::var_os("USERPROFILE")
        .map(PathBuf::from)
        .ok_or_else(|| TransferError::Bootstrap("USERPROFILE is not set".into()))
}

async fn run_step(
    exec: &dyn CommandExecutor,
    spec: CommandSpec,
    step: &str,
) -> Result<(), TransferError> {
    let output = exec
        .run(spec)
        .await
        .map_err(|e| TransferError::Bootstrap(format!("{step}: {e}")))?;
    if !output.success() {
        return Err(TransferError::Bootstrap(format!(
            "{step}: exit code {}: {}",
            output.exit_code,
            output.stderr.trim()
        )));
    }
    debug!(step, "bootstrap step ok");
    Ok(())
}
