mod config;
mod contracts;
mod document;
mod errors;
mod layout;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::LayoutEngine;
use crate::render::{Renderer, TextRenderer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparsable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting contract composer v{}", env!("CARGO_PKG_VERSION"));

    // Build the layout engine once; geometry errors stop startup
    let engine = LayoutEngine::new(config.geometry.clone())
        .context("Configured page geometry is invalid")?;
    let geometry = engine.geometry();
    info!(
        "Page geometry: {}x{} content width {} floor {}",
        geometry.page_width,
        geometry.page_height,
        geometry.content_width(),
        geometry.content_floor()
    );

    let renderer: Arc<dyn Renderer> = Arc::new(TextRenderer);
    info!("Renderer initialized ({})", renderer.media_type());

    // Build app state
    let state = AppState {
        engine: Arc::new(engine),
        renderer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
