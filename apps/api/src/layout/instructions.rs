//! Draw Instruction Stream: the seam between layout and rendering.
//!
//! Instructions are pure data. The layout engine is the only producer and
//! appends in placement order; a renderer consumes them in that same order.
//! Nothing here knows about the target output format.

use serde::Serialize;

use crate::layout::font_metrics::TextStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
}

/// Where the renderer's pen goes after a cell is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellAdvance {
    /// Stay on the line, continue at the cell's right edge.
    Right,
    /// Return to the left margin below the cell.
    NextLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawInstruction {
    /// Text at an absolute position on the current page, aligned within
    /// `width`. The pen is left untouched (page furniture such as the footer).
    PlaceText {
        text: String,
        x: f32,
        y: f32,
        width: f32,
        style: TextStyle,
        align: Align,
    },
    PlaceCell {
        text: String,
        width: f32,
        height: f32,
        style: TextStyle,
        align: Align,
        advance: CellAdvance,
    },
    /// Text wrapped within `width`; the pen ends at the left margin below it.
    PlaceMultilineBlock {
        text: String,
        width: f32,
        line_height: f32,
        style: TextStyle,
    },
    AdvanceCursor {
        height: f32,
    },
    /// Opens page `page_number`.
    NewPage {
        page_number: u32,
    },
}

impl DrawInstruction {
    /// Text carried by the instruction, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawInstruction::PlaceText { text, .. }
            | DrawInstruction::PlaceCell { text, .. }
            | DrawInstruction::PlaceMultilineBlock { text, .. } => Some(text),
            DrawInstruction::AdvanceCursor { .. } | DrawInstruction::NewPage { .. } => None,
        }
    }

    pub fn is_new_page(&self) -> bool {
        matches!(self, DrawInstruction::NewPage { .. })
    }

    pub fn is_footer(&self) -> bool {
        matches!(
            self,
            DrawInstruction::PlaceText {
                style: TextStyle::Footer,
                ..
            }
        )
    }
}

/// Append-only, ordered sequence of draw instructions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DrawStream {
    instructions: Vec<DrawInstruction>,
}

impl DrawStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: DrawInstruction) {
        self.instructions.push(instruction);
    }

    pub fn extend(&mut self, instructions: impl IntoIterator<Item = DrawInstruction>) {
        self.instructions.extend(instructions);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawInstruction> {
        self.instructions.iter()
    }

    pub fn as_slice(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    /// Text payloads in emission order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().filter_map(DrawInstruction::text)
    }
}

impl<'a> IntoIterator for &'a DrawStream {
    type Item = &'a DrawInstruction;
    type IntoIter = std::slice::Iter<'a, DrawInstruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_preserves_push_order() {
        let mut stream = DrawStream::new();
        stream.push(DrawInstruction::AdvanceCursor { height: 5.0 });
        stream.push(DrawInstruction::NewPage { page_number: 2 });
        stream.extend([DrawInstruction::AdvanceCursor { height: 1.0 }]);

        assert_eq!(stream.len(), 3);
        assert!(stream.as_slice()[1].is_new_page());
        assert_eq!(
            stream.iter().last(),
            Some(&DrawInstruction::AdvanceCursor { height: 1.0 })
        );
    }

    #[test]
    fn test_texts_skip_non_text_instructions() {
        let mut stream = DrawStream::new();
        stream.push(DrawInstruction::PlaceText {
            text: "Page 1".to_string(),
            x: 20.0,
            y: 282.0,
            width: 170.0,
            style: TextStyle::Footer,
            align: Align::Center,
        });
        stream.push(DrawInstruction::AdvanceCursor { height: 5.0 });
        assert_eq!(stream.texts().collect::<Vec<_>>(), vec!["Page 1"]);
        assert!(stream.as_slice()[0].is_footer());
    }

    #[test]
    fn test_instruction_serializes_with_op_tag() {
        let json = serde_json::to_value(DrawInstruction::NewPage { page_number: 2 }).unwrap();
        assert_eq!(json["op"], "new_page");
        assert_eq!(json["page_number"], 2);
    }
}
