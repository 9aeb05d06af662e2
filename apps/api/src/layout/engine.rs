//! Layout Engine: paginates a `Document` into a `DrawStream`.
//!
//! # Page-break rule
//! Every unit (a title line, a wrapped paragraph, a key/value row, the whole
//! signature block) is measured before it is emitted. If it would cross the
//! content floor and the cursor is not already at the top of the content
//! area, the engine closes the page (footer, then `NewPage`) and places the
//! unit on the fresh page. Units are never split. A unit taller than the whole
//! content area still lands alone on its own page and is reported as an
//! `OverflowNotice` instead of looping.
//!
//! # Page furniture
//! The letterhead is drawn on page 1 only. The footer is drawn once on every
//! page, immediately before the `NewPage` that closes it and once at the end
//! of the stream.

use std::ops::Range;

use serde::Serialize;
use tracing::{debug, warn};

use crate::document::{BlockContent, Document, KeyValueRow, SignatureBlock};
use crate::errors::ComposeError;
use crate::layout::font_metrics::TextStyle;
use crate::layout::geometry::PageGeometry;
use crate::layout::instructions::{Align, CellAdvance, DrawInstruction, DrawStream};

const LETTERHEAD_HEIGHT: f32 = 10.0;
const LETTERHEAD_SPACING: f32 = 5.0;
const TITLE_HEIGHT: f32 = 10.0;
const SUBTITLE_HEIGHT: f32 = 8.0;
const HEADING_HEIGHT: f32 = 8.0;
const SIGNATURE_LABEL_HEIGHT: f32 = 8.0;
const SIGNATURE_MARK_GAP: f32 = 15.0;
const SIGNATURE_MARK_HEIGHT: f32 = 8.0;
const SIGNATURE_NAME_HEIGHT: f32 = 6.0;

/// Tolerance for accumulated f32 error in cursor arithmetic.
const EPSILON: f32 = 1e-3;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Vertical position tracker for one layout pass.
///
/// `y_offset` is measured from the top edge of the page and starts at the top
/// margin on every page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageCursor {
    pub page_number: u32,
    pub y_offset: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Letterhead,
    Title,
    Subtitle,
    SectionTitle,
    Paragraph,
    KeyValueRow,
    Signature,
}

/// Where one unit landed and which slice of the stream draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitPlacement {
    pub kind: UnitKind,
    pub page: u32,
    pub y: f32,
    pub height: f32,
    pub instructions: Range<usize>,
}

/// A unit taller than the entire content area, placed alone on `page`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverflowNotice {
    pub kind: UnitKind,
    pub page: u32,
    pub height: f32,
    pub usable_height: f32,
}

#[derive(Debug, Clone)]
pub struct LayoutOutcome {
    pub stream: DrawStream,
    pub page_count: u32,
    pub placements: Vec<UnitPlacement>,
    pub overflows: Vec<OverflowNotice>,
}

/// Transient per-unit state. `Breaking` lasts only until the new page opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    OnPage,
    Breaking,
}

/// A measured, indivisible group of instructions.
#[derive(Debug)]
struct Unit {
    kind: UnitKind,
    height: f32,
    instructions: Vec<DrawInstruction>,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LayoutEngine {
    geometry: PageGeometry,
}

impl LayoutEngine {
    pub fn new(geometry: PageGeometry) -> Result<Self, ComposeError> {
        geometry.validate()?;
        Ok(Self { geometry })
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Runs one layout pass over `document`.
    pub fn layout(&self, document: &Document) -> LayoutOutcome {
        let g = &self.geometry;
        let mut pass = LayoutPass::new(g, document);

        pass.place(text_line(
            g,
            UnitKind::Letterhead,
            &document.letterhead,
            TextStyle::Letterhead,
            LETTERHEAD_HEIGHT,
            Align::Center,
        ));
        pass.advance(LETTERHEAD_SPACING);

        pass.place(text_line(
            g,
            UnitKind::Title,
            &document.title.title,
            TextStyle::Title,
            TITLE_HEIGHT,
            Align::Center,
        ));
        pass.place(text_line(
            g,
            UnitKind::Subtitle,
            &document.title.subtitle,
            TextStyle::Body,
            SUBTITLE_HEIGHT,
            Align::Left,
        ));
        pass.advance(document.title.spacing_after);

        for section in &document.sections {
            pass.place(text_line(
                g,
                UnitKind::SectionTitle,
                &section.title,
                TextStyle::Heading,
                HEADING_HEIGHT,
                Align::Left,
            ));
            for block in &section.blocks {
                match &block.content {
                    BlockContent::Text(text) => pass.place(paragraph(g, text)),
                    BlockContent::Rows(rows) => {
                        for row in rows {
                            pass.place(key_value_row(g, row));
                        }
                    }
                }
                pass.advance(block.spacing_after);
            }
        }

        pass.advance(document.signature.gap_before);
        pass.place(signature(g, &document.signature));

        pass.finish()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout pass (cursor + overflow rule)
// ────────────────────────────────────────────────────────────────────────────

struct LayoutPass<'a> {
    geometry: &'a PageGeometry,
    document: &'a Document,
    cursor: PageCursor,
    stream: DrawStream,
    placements: Vec<UnitPlacement>,
    overflows: Vec<OverflowNotice>,
}

impl<'a> LayoutPass<'a> {
    fn new(geometry: &'a PageGeometry, document: &'a Document) -> Self {
        Self {
            geometry,
            document,
            cursor: PageCursor {
                page_number: 1,
                y_offset: geometry.top_of_content(),
            },
            stream: DrawStream::new(),
            placements: Vec::new(),
            overflows: Vec::new(),
        }
    }

    fn at_top_of_content(&self) -> bool {
        (self.cursor.y_offset - self.geometry.top_of_content()).abs() < EPSILON
    }

    fn state_for(&self, height: f32) -> CursorState {
        let crosses_floor = self.cursor.y_offset + height > self.geometry.content_floor() + EPSILON;
        if crosses_floor && !self.at_top_of_content() {
            CursorState::Breaking
        } else {
            CursorState::OnPage
        }
    }

    /// The single page-break rule: every unit goes through here.
    fn place(&mut self, unit: Unit) {
        if self.state_for(unit.height) == CursorState::Breaking {
            self.break_page();
        }

        let usable_height = self.geometry.usable_height();
        if unit.height > usable_height + EPSILON {
            warn!(
                kind = ?unit.kind,
                page = self.cursor.page_number,
                height = unit.height,
                usable_height,
                "Layout unit taller than the content area; placing it alone on its page"
            );
            self.overflows.push(OverflowNotice {
                kind: unit.kind,
                page: self.cursor.page_number,
                height: unit.height,
                usable_height,
            });
        }

        let start = self.stream.len();
        self.stream.extend(unit.instructions);
        self.placements.push(UnitPlacement {
            kind: unit.kind,
            page: self.cursor.page_number,
            y: self.cursor.y_offset,
            height: unit.height,
            instructions: start..self.stream.len(),
        });
        self.cursor.y_offset += unit.height;
    }

    /// Inter-unit whitespace, clamped so the cursor never passes the floor.
    fn advance(&mut self, gap: f32) {
        let room = (self.geometry.content_floor() - self.cursor.y_offset).max(0.0);
        let step = gap.min(room);
        if step > EPSILON {
            self.stream.push(DrawInstruction::AdvanceCursor { height: step });
            self.cursor.y_offset += step;
        }
    }

    fn break_page(&mut self) {
        self.emit_footer();
        self.cursor.page_number += 1;
        self.cursor.y_offset = self.geometry.top_of_content();
        self.stream.push(DrawInstruction::NewPage {
            page_number: self.cursor.page_number,
        });
        debug!(page = self.cursor.page_number, "Opened new page");
    }

    fn emit_footer(&mut self) {
        self.stream.push(DrawInstruction::PlaceText {
            text: self.document.footer_text(self.cursor.page_number),
            x: self.geometry.margin_left,
            y: self.geometry.footer_y(),
            width: self.geometry.content_width(),
            style: TextStyle::Footer,
            align: Align::Center,
        });
    }

    fn finish(mut self) -> LayoutOutcome {
        self.emit_footer();
        LayoutOutcome {
            stream: self.stream,
            page_count: self.cursor.page_number,
            placements: self.placements,
            overflows: self.overflows,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Unit builders
// ────────────────────────────────────────────────────────────────────────────

/// A single-line cell, or a wrapped block when the text is wider than the
/// content area. Text is never truncated.
fn text_line(
    g: &PageGeometry,
    kind: UnitKind,
    text: &str,
    style: TextStyle,
    height: f32,
    align: Align,
) -> Unit {
    let width = g.content_width();
    let (instruction, lines) = cell_or_block(text, width, height, style, align, CellAdvance::NextLine);
    Unit {
        kind,
        height: height * lines as f32,
        instructions: vec![instruction],
    }
}

fn paragraph(g: &PageGeometry, text: &str) -> Unit {
    let width = g.content_width();
    let lines = TextStyle::Body.wrap(text, width).len().max(1);
    Unit {
        kind: UnitKind::Paragraph,
        height: g.line_height * lines as f32,
        instructions: vec![DrawInstruction::PlaceMultilineBlock {
            text: text.to_string(),
            width,
            line_height: g.line_height,
            style: TextStyle::Body,
        }],
    }
}

fn key_value_row(g: &PageGeometry, row: &KeyValueRow) -> Unit {
    let label = DrawInstruction::PlaceCell {
        text: format!("{}:", row.label),
        width: g.label_column_width,
        height: g.line_height,
        style: TextStyle::Label,
        align: Align::Left,
        advance: CellAdvance::Right,
    };
    let (value, lines) = cell_or_block(
        &row.value,
        g.value_column_width(),
        g.line_height,
        TextStyle::Body,
        Align::Left,
        CellAdvance::NextLine,
    );
    Unit {
        kind: UnitKind::KeyValueRow,
        height: g.line_height * lines as f32,
        instructions: vec![label, value],
    }
}

fn signature(g: &PageGeometry, block: &SignatureBlock) -> Unit {
    let width = g.signature_column_width();
    let cell = |text: &str, height: f32, style: TextStyle, advance: CellAdvance| {
        DrawInstruction::PlaceCell {
            text: text.to_string(),
            width,
            height,
            style,
            align: Align::Left,
            advance,
        }
    };

    Unit {
        kind: UnitKind::Signature,
        height: SIGNATURE_LABEL_HEIGHT
            + SIGNATURE_MARK_GAP
            + SIGNATURE_MARK_HEIGHT
            + SIGNATURE_NAME_HEIGHT,
        instructions: vec![
            cell(&block.agency.label, SIGNATURE_LABEL_HEIGHT, TextStyle::Label, CellAdvance::Right),
            cell(&block.client.label, SIGNATURE_LABEL_HEIGHT, TextStyle::Label, CellAdvance::NextLine),
            DrawInstruction::AdvanceCursor {
                height: SIGNATURE_MARK_GAP,
            },
            cell(&block.agency.mark_line, SIGNATURE_MARK_HEIGHT, TextStyle::Label, CellAdvance::Right),
            cell(&block.client.mark_line, SIGNATURE_MARK_HEIGHT, TextStyle::Label, CellAdvance::NextLine),
            cell(
                &block.agency.printed_name,
                SIGNATURE_NAME_HEIGHT,
                TextStyle::Signature,
                CellAdvance::Right,
            ),
            cell(
                &block.client.printed_name,
                SIGNATURE_NAME_HEIGHT,
                TextStyle::Signature,
                CellAdvance::NextLine,
            ),
        ],
    }
}

/// Returns a `PlaceCell` when `text` fits on one line of `width`, otherwise a
/// `PlaceMultilineBlock`, together with the number of printed lines.
fn cell_or_block(
    text: &str,
    width: f32,
    line_height: f32,
    style: TextStyle,
    align: Align,
    advance: CellAdvance,
) -> (DrawInstruction, usize) {
    if style.measure(text) <= width && !text.contains('\n') {
        let cell = DrawInstruction::PlaceCell {
            text: text.to_string(),
            width,
            height: line_height,
            style,
            align,
            advance,
        };
        return (cell, 1);
    }

    let lines = style.wrap(text, width).len().max(1);
    let block = DrawInstruction::PlaceMultilineBlock {
        text: text.to_string(),
        width,
        line_height,
        style,
    };
    (block, lines)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
