//! Binary entrypoint: wires up an empty `InMemoryStore`, binds the HTTP
//! server, and starts accepting runs. A real deployment replaces
//! `InMemoryStore` with a durable `SnapshotSource`/`PlanWriter` adapter.

use anyhow::{Context, Result};
use printsched_core::SchedulerConfig;
use printsched_persist::InMemoryStore;
use printsched_server::{app, AppState};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = load_config()?;
    let store = InMemoryStore::new(vec![], vec![], vec![], vec![], vec![], vec![]);
    let state = AppState::new(store, config);

    let addr = std::env::var("PRINTSCHED_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;
    tracing::info!(%addr, "printsched-server listening");

    axum::serve(listener, app(state))
        .await
        .context("server loop failed")
}

fn load_config() -> Result<SchedulerConfig> {
    let Ok(path) = std::env::var("PRINTSCHED_CONFIG") else {
        return Ok(SchedulerConfig::default());
    };
    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading config at {path}"))?;
    SchedulerConfig::from_toml(&raw).with_context(|| format!("parsing config at {path}"))
}
