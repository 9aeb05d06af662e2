// Layout Engine: paginates a Document into an ordered Draw Instruction Stream.
// Units are measured with the font-metric tables before placement and are never
// split across pages. Layout is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod engine;
pub mod font_metrics;
pub mod geometry;
pub mod instructions;

// Re-export the public API consumed by the composer, renderers and handlers.
pub use engine::{LayoutEngine, LayoutOutcome, OverflowNotice, UnitKind, UnitPlacement};
pub use font_metrics::TextStyle;
pub use geometry::PageGeometry;
pub use instructions::{Align, CellAdvance, DrawInstruction, DrawStream};
