//! # scenecastd — scenecast daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Load and validate the JSON scene catalog
//! - Construct the device channel (virtual or HTTP bridge)
//! - Construct the scheduler and scene applier, injecting the channel and
//!   log sink via port traits
//! - Build the axum router, injecting the applier and catalog
//! - Bind to a TCP port and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod scenes;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use scenecast_adapter_bridge_http::HttpBridgeChannel;
use scenecast_adapter_http_axum::router;
use scenecast_adapter_http_axum::state::AppState;
use scenecast_adapter_virtual::VirtualLightChannel;
use scenecast_app::applier::SceneApplier;
use scenecast_app::log_sink::TracingLogSink;
use scenecast_app::ports::LightChannel;
use scenecast_app::scheduler::Scheduler;
use scenecast_domain::catalog::SceneCatalog;

use config::{BridgeMode, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let catalog = scenes::load(&config.scenes.file)
        .with_context(|| format!("loading scene file {}", config.scenes.file))?;
    tracing::info!(
        scenes = catalog.len(),
        zones = catalog.zones().len(),
        "scene catalog loaded"
    );

    match config.bridge.mode {
        BridgeMode::Virtual => {
            tracing::info!("using virtual light channel");
            serve(VirtualLightChannel::new(), catalog, &config).await
        }
        BridgeMode::Http => {
            tracing::info!(host = %config.bridge.http.host, "using HTTP bridge channel");
            let channel = HttpBridgeChannel::new(config.bridge.http.clone())
                .context("constructing bridge channel")?;
            serve(channel, catalog, &config).await
        }
    }
}

async fn serve<C>(channel: C, catalog: SceneCatalog, config: &Config) -> anyhow::Result<()>
where
    C: LightChannel + 'static,
{
    let scheduler = Scheduler::new(
        Arc::new(channel),
        Arc::new(TracingLogSink),
        config.rate_limit(),
    )?;
    let applier = SceneApplier::new(scheduler);
    let state = AppState::new(applier, catalog);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "scenecastd listening");

    axum::serve(listener, app).await?;
    Ok(())
}
