//! Renderers: consume a `DrawStream` strictly in order and produce bytes.
//!
//! `AppState` holds an `Arc<dyn Renderer>`, so a PDF or image backend can be
//! swapped in without touching the composer or the handlers.

pub mod text;

use bytes::Bytes;
use thiserror::Error;

use crate::layout::{DrawStream, PageGeometry};

pub use text::TextRenderer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Draw stream is empty")]
    EmptyStream,

    #[error("New page out of sequence: expected page {expected}, found page {found}")]
    OutOfSequence { expected: u32, found: u32 },
}

/// Output of one render call.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    pub bytes: Bytes,
    pub media_type: &'static str,
    pub page_count: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A rendering backend. Implementations must not reorder instructions and
/// must not retry on failure; the caller decides what to do with an error.
pub trait Renderer: Send + Sync {
    fn media_type(&self) -> &'static str;

    /// File extension (without the dot) for delivered artifacts.
    fn extension(&self) -> &'static str;

    fn render(
        &self,
        stream: &DrawStream,
        geometry: &PageGeometry,
    ) -> Result<RenderedArtifact, RenderError>;
}
