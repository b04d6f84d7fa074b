//! sshdrop command-line entry point.
//!
//! A thin boundary standing in for the GUI collaborator: collects the
//! endpoint and paths, runs one transfer session, renders progress lines,
//! and maps the terminal outcome to the process exit status.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sshdrop_session::{SessionEvent, TransferSession};
use sshdrop_transfer::{bootstrap, Endpoint, ProcessExecutor, Secret, TransferRequest};
use tracing_subscriber::EnvFilter;

/// Deliver a local file to a remote host over SSH (plink/pscp).
#[derive(Debug, Parser)]
#[command(name = "sshdrop", version)]
struct Args {
    /// Remote login user.
    #[arg(short, long)]
    user: String,

    /// Remote host name or IP address.
    #[arg(long)]
    host: String,

    /// Login password.
    #[arg(short, long, env = "SSHDROP_PASSWORD", hide_env_values = true)]
    password: String,

    /// Local file to deliver.
    source: PathBuf,

    /// Remote destination path; `~/`-relative forms are resolved remotely.
    #[arg(default_value = "~/tempTest")]
    destination: String,

    /// Skip the tool bootstrap precheck.
    #[arg(long)]
    no_bootstrap: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let exec = Arc::new(ProcessExecutor);

    if !args.no_bootstrap {
        bootstrap::ensure_tools(exec.as_ref())
            .await
            .context("tool bootstrap failed")?;
    }

    let request = TransferRequest {
        endpoint: Endpoint::new(args.user, args.host, Secret::new(args.password)),
        local_path: args.source,
        remote_destination: args.destination,
    };

    let mut session = TransferSession::spawn(exec, request);
    let mut events = session
        .take_events()
        .context("event channel already taken")?;

    let mut exit_code = 1;
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Progress(p) => {
                if let Some(percent) = p.percent {
                    println!("{percent:>3}%  {}", p.raw_line.trim());
                } else if !p.raw_line.trim().is_empty() {
                    println!("      {}", p.raw_line.trim());
                }
            }
            SessionEvent::Finished(result) => {
                if result.success() {
                    tracing::info!("transfer complete");
                    exit_code = 0;
                } else {
                    tracing::error!(
                        code = result.exit_code,
                        stderr = %result.stderr.trim(),
                        "transfer failed"
                    );
                    exit_code = result.exit_code;
                }
            }
            SessionEvent::Failed { error } => {
                tracing::error!(%error, "transfer could not run");
                exit_code = 1;
            }
        }
    }
    session.join().await;

    std::process::exit(exit_code);
}
