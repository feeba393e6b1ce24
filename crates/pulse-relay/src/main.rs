// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pulse relay service.
//! Serves the pulse page and answers `GET /pulse` by pulsing the relay.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pulse_relay::{router, Args, LoggingRelay, PulseScheduler, RelayConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = RelayConfig::try_from(args).context("invalid arguments")?;
    let relay = Arc::new(LoggingRelay::default());
    let scheduler = Arc::new(PulseScheduler::new(relay, config.time_on));
    let app = router(Arc::clone(&scheduler), &config.doc_root);

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("bind {}", config.listen))?;
    info!(
        listen = %config.listen,
        doc_root = %config.doc_root.display(),
        time_on_ms = config.time_on.as_millis(),
        "pulse relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;

    scheduler.shutdown();
    info!("pulse relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(?err, "failed to install ctrl-c handler; running until killed");
        std::future::pending::<()>().await;
    }
}
