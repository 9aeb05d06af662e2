//! Composer: the single entry point of the composition engine.
//!
//! Runs the builder and the layout engine back to back. Pure and synchronous:
//! callers on the async runtime wrap it in `tokio::task::spawn_blocking`.

use serde::Serialize;
use tracing::debug;

use crate::document::build_document;
use crate::errors::ComposeError;
use crate::layout::{DrawStream, LayoutEngine, OverflowNotice, UnitPlacement};
use crate::models::contract::ContractRecord;

/// A fully laid-out agreement, ready for a renderer.
#[derive(Debug, Clone)]
pub struct ComposedContract {
    pub stream: DrawStream,
    pub page_count: u32,
    pub section_count: usize,
    pub placements: Vec<UnitPlacement>,
    pub overflows: Vec<OverflowNotice>,
}

/// Counts handed to the delivery side alongside the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompositionMetadata {
    pub page_count: u32,
    pub section_count: usize,
}

impl ComposedContract {
    pub fn metadata(&self) -> CompositionMetadata {
        CompositionMetadata {
            page_count: self.page_count,
            section_count: self.section_count,
        }
    }
}

/// Composes the agreement for `record`.
///
/// An invalid record fails before any instruction is produced. Oversized
/// units do not fail; they come back in `overflows`.
pub fn compose_contract(
    record: &ContractRecord,
    engine: &LayoutEngine,
) -> Result<ComposedContract, ComposeError> {
    let document = build_document(record)?;
    let outcome = engine.layout(&document);

    debug!(
        pages = outcome.page_count,
        sections = document.sections.len(),
        clauses = document.clause_count(),
        instructions = outcome.stream.len(),
        overflows = outcome.overflows.len(),
        "Composed contract"
    );

    Ok(ComposedContract {
        stream: outcome.stream,
        page_count: outcome.page_count,
        section_count: document.sections.len(),
        placements: outcome.placements,
        overflows: outcome.overflows,
    })
}
