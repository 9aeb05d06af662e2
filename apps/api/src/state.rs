use std::sync::Arc;

use crate::layout::LayoutEngine;
use crate::render::Renderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only layout engine built once from the configured page geometry.
    pub engine: Arc<LayoutEngine>,
    /// Pluggable renderer. Default: TextRenderer.
    pub renderer: Arc<dyn Renderer>,
}
