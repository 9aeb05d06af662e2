//! Plain-text reference renderer.
//!
//! Maps layout widths onto fixed character columns, wraps multi-line blocks
//! with the same font metrics the layout engine used, and separates pages
//! with a form-feed line. Useful for previews, logs and tests.

use bytes::Bytes;
use tracing::debug;

use crate::layout::{Align, CellAdvance, DrawInstruction, DrawStream, PageGeometry};
use crate::render::{RenderError, RenderedArtifact, Renderer};

/// Layout units per character column.
const COLUMN_WIDTH: f32 = 2.0;
const FORM_FEED: char = '\u{0c}';

#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn media_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(
        &self,
        stream: &DrawStream,
        geometry: &PageGeometry,
    ) -> Result<RenderedArtifact, RenderError> {
        if stream.is_empty() {
            return Err(RenderError::EmptyStream);
        }

        let mut out = String::new();
        let mut page = PageBuffer::default();
        let mut page_number = 1;

        for instruction in stream {
            match instruction {
                DrawInstruction::PlaceCell {
                    text,
                    width,
                    align,
                    advance,
                    ..
                } => {
                    let cell = pad(text, columns(*width), *align);
                    match advance {
                        CellAdvance::Right => page.line.push_str(&cell),
                        CellAdvance::NextLine => {
                            page.line.push_str(&cell);
                            page.flush_line();
                        }
                    }
                }
                DrawInstruction::PlaceText {
                    text, width, align, ..
                } => page.furniture.push(pad(text, columns(*width), *align)),
                DrawInstruction::PlaceMultilineBlock {
                    text, width, style, ..
                } => {
                    let indent = page.line.chars().count();
                    for (i, line) in style.wrap(text, *width).into_iter().enumerate() {
                        if i > 0 {
                            page.line = " ".repeat(indent);
                        }
                        page.line.push_str(&line);
                        page.flush_line();
                    }
                }
                DrawInstruction::AdvanceCursor { height } => {
                    if !page.line.is_empty() {
                        page.flush_line();
                    }
                    let blank = (height / geometry.line_height).round() as usize;
                    page.lines.extend(std::iter::repeat(String::new()).take(blank));
                }
                DrawInstruction::NewPage { page_number: found } => {
                    let expected = page_number + 1;
                    if *found != expected {
                        return Err(RenderError::OutOfSequence {
                            expected,
                            found: *found,
                        });
                    }
                    std::mem::take(&mut page).write_to(&mut out);
                    out.push(FORM_FEED);
                    out.push('\n');
                    page_number = *found;
                }
            }
        }
        page.write_to(&mut out);

        debug!(pages = page_number, bytes = out.len(), "Rendered text artifact");

        Ok(RenderedArtifact {
            bytes: Bytes::from(out),
            media_type: self.media_type(),
            page_count: page_number,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page buffer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct PageBuffer {
    lines: Vec<String>,
    line: String,
    /// Absolutely placed text (the footer), written below the flowing lines.
    furniture: Vec<String>,
}

impl PageBuffer {
    fn flush_line(&mut self) {
        let line = std::mem::take(&mut self.line);
        self.lines.push(line.trim_end().to_string());
    }

    fn write_to(mut self, out: &mut String) {
        if !self.line.is_empty() {
            self.flush_line();
        }
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        if !self.furniture.is_empty() {
            out.push('\n');
        }
        for line in &self.furniture {
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
}

fn columns(width: f32) -> usize {
    (width / COLUMN_WIDTH).round().max(1.0) as usize
}

/// Pads `text` to `cols` characters. Longer text is kept whole.
fn pad(text: &str, cols: usize, align: Align) -> String {
    let len = text.chars().count();
    if len >= cols {
        return text.to_string();
    }
    let spare = cols - len;
    match align {
        Align::Left => format!("{text}{}", " ".repeat(spare)),
        Align::Center => {
            let left = spare / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(spare - left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::build_document;
    use crate::layout::{LayoutEngine, TextStyle};
    use crate::models::contract::sample_record;

    fn render_sample() -> (String, u32) {
        let geometry = PageGeometry::default();
        let engine = LayoutEngine::new(geometry.clone()).unwrap();
        let outcome = engine.layout(&build_document(&sample_record()).unwrap());
        let artifact = TextRenderer.render(&outcome.stream, &geometry).unwrap();
        assert_eq!(artifact.page_count, outcome.page_count);
        (String::from_utf8(artifact.bytes.to_vec()).unwrap(), outcome.page_count)
    }

    #[test]
    fn test_render_separates_pages_with_form_feed() {
        let (text, pages) = render_sample();
        let separators = text.lines().filter(|l| *l == "\u{0c}").count();
        assert_eq!(separators as u32, pages - 1);
        for n in 1..=pages {
            assert!(text.contains(&format!("Page {n}")), "missing footer for page {n}");
        }
    }

    #[test]
    fn test_render_aligns_key_value_rows() {
        let (text, _) = render_sample();
        let expected = format!("{:<30}Italy", "Destination:");
        assert!(text.lines().any(|l| l == expected), "no aligned row in:\n{text}");
    }

    #[test]
    fn test_render_centres_letterhead() {
        let (text, _) = render_sample();
        let first = text.lines().next().unwrap();
        assert_eq!(first.trim(), "EUROLUXE Sp. z o.o.");
        assert!(first.starts_with(' '));
    }

    #[test]
    fn test_render_empty_stream_fails() {
        let err = TextRenderer
            .render(&DrawStream::new(), &PageGeometry::default())
            .unwrap_err();
        assert_eq!(err, RenderError::EmptyStream);
    }

    #[test]
    fn test_render_rejects_skipped_page() {
        let mut stream = DrawStream::new();
        stream.push(DrawInstruction::PlaceText {
            text: "Page 1".to_string(),
            x: 20.0,
            y: 282.0,
            width: 170.0,
            style: TextStyle::Footer,
            align: Align::Center,
        });
        stream.push(DrawInstruction::NewPage { page_number: 3 });

        let err = TextRenderer
            .render(&stream, &PageGeometry::default())
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::OutOfSequence {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_pad_keeps_overlong_text() {
        assert_eq!(pad("abcdef", 3, Align::Left), "abcdef");
        assert_eq!(pad("ab", 6, Align::Center), "  ab  ");
    }
}
