//! GK-Admin: Gatekeeper Admin CLI

use std::time::Duration;

use clap::Parser;
use gk_admin::{Admin, AdminConfig, Command};
use gk_telemetry::{init_logging, TelemetryConfig};

/// GK-Admin: Gatekeeper Admin CLI
#[derive(Parser, Debug)]
#[command(name = "gk-admin", version)]
#[command(about = "Admin CLI for the gatekeeper DID ledger and its registry queues")]
struct Args {
    /// Ledger node URL
    #[arg(long, env = "GK_GATEKEEPER_URL")]
    gatekeeper_url: Option<String>,

    /// Wallet service URL
    #[arg(long, env = "GK_KEYMASTER_URL")]
    keymaster_url: Option<String>,

    /// Events per import request
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Chunks submitted in parallel
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-chunk timeout in seconds
    #[arg(long)]
    chunk_timeout: Option<u64>,

    /// Readiness probes before giving up
    #[arg(long)]
    ready_attempts: Option<u32>,

    /// Emit JSON logs on stderr
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env().for_service(env!("CARGO_PKG_NAME"));
    telemetry.json_logs |= args.json_logs;
    init_logging(&telemetry)?;

    let mut config = AdminConfig::from_env();
    if let Some(url) = args.gatekeeper_url {
        config.gatekeeper_url = url;
    }
    if let Some(url) = args.keymaster_url {
        config.keymaster_url = url;
    }
    if let Some(size) = args.chunk_size {
        config = config.with_chunk_size(size);
    }
    if let Some(concurrency) = args.concurrency {
        config.import.max_concurrent_chunks = concurrency;
    }
    if let Some(secs) = args.chunk_timeout {
        config.import.chunk_timeout = Some(Duration::from_secs(secs));
    }
    if args.ready_attempts.is_some() {
        config.ready_attempts = args.ready_attempts;
    }

    let admin = Admin::new(config)?;
    if args.command.needs_node() {
        admin.wait_until_ready().await?;
    }

    let output = admin.execute(args.command).await?;
    println!("{output}");
    Ok(())
}
