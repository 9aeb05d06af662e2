// Document Model: the structured agreement before pagination.
// Built fresh per request by `builder::build_document` and discarded once laid out.

pub mod builder;
pub mod template;

pub use builder::build_document;

use serde::Serialize;

/// A label/value pair rendered as an aligned two-column line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyValueRow {
    pub label: String,
    pub value: String,
}

/// Content of one block inside a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum BlockContent {
    Text(String),
    Rows(Vec<KeyValueRow>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyBlock {
    pub content: BlockContent,
    pub spacing_after: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: &'static str,
    /// Clause number; `None` for the party preamble sections.
    pub number: Option<u8>,
    /// Display title, already prefixed with `§n.` for clauses.
    pub title: String,
    pub blocks: Vec<BodyBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleBlock {
    pub title: String,
    pub subtitle: String,
    pub spacing_after: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignatureColumn {
    pub label: String,
    pub mark_line: String,
    pub printed_name: String,
}

/// Agency and client columns, laid out side by side as one atomic unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignatureBlock {
    pub gap_before: f32,
    pub agency: SignatureColumn,
    pub client: SignatureColumn,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Drawn at the top of page 1 only.
    pub letterhead: String,
    pub title: TitleBlock,
    pub sections: Vec<Section>,
    pub signature: SignatureBlock,
    /// Footer text with a `{page}` placeholder.
    pub footer_template: &'static str,
}

impl Document {
    /// Number of numbered clause sections.
    pub fn clause_count(&self) -> usize {
        self.sections.iter().filter(|s| s.number.is_some()).count()
    }

    pub fn footer_text(&self, page_number: u32) -> String {
        self.footer_template
            .replace("{page}", &page_number.to_string())
    }

    /// Iterates every key/value row in document order.
    pub fn rows(&self) -> impl Iterator<Item = &KeyValueRow> {
        self.sections
            .iter()
            .flat_map(|s| s.blocks.iter())
            .filter_map(|b| match &b.content {
                BlockContent::Rows(rows) => Some(rows.iter()),
                BlockContent::Text(_) => None,
            })
            .flatten()
    }
}
