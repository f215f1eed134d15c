use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use courier_core::app::{Controller, PollSettings};
use courier_core::domain::RunConfig;
use courier_core::impls::{DryRunGate, HttpQueueClient};

/// Poll a remote queue of pending outbound messages and dispatch them.
#[derive(Debug, Parser)]
#[command(name = "courier")]
struct Args {
    /// Remote queue base URL.
    #[arg(long, env = "COURIER_ENDPOINT")]
    endpoint: String,

    /// Auth token attached to every remote call.
    #[arg(long, env = "COURIER_CREDENTIAL")]
    credential: String,

    /// Seconds between polling cycles.
    #[arg(long, default_value_t = 60)]
    interval: u64,

    /// Seconds between consecutive sends within one batch.
    #[arg(long, default_value_t = 1)]
    pacing: u64,

    /// Start with polling paused.
    #[arg(long)]
    paused: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (config_tx, config_rx) = watch::channel(RunConfig {
        endpoint: args.endpoint,
        credential: args.credential,
        active: !args.paused,
    });

    let queue = match HttpQueueClient::new(config_rx.clone()) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            error!(%err, "failed to build http client");
            std::process::exit(1);
        }
    };
    // The real send capability is platform glue supplied by embedders; the
    // binary runs the loop against a real store with a dry-run gate.
    let gate = Arc::new(DryRunGate);

    let settings = PollSettings {
        interval: Duration::from_secs(args.interval),
        pacing: Duration::from_secs(args.pacing),
    };
    let handle = Controller::spawn(gate, queue, config_rx, settings);

    // Mirror every status transition into the log.
    let mut status = handle.status();
    tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let s = status.borrow().clone();
            info!(
                pending = s.pending,
                sent = s.sent_total,
                failed = s.failed_total,
                "{}",
                s.line
            );
        }
    });

    if tokio::signal::ctrl_c().await.is_err() {
        error!("failed to listen for shutdown signal");
    }
    info!("shutting down");
    config_tx.send_modify(|c| c.active = false);
    handle.shutdown().await;
}
