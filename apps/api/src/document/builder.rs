//! Document Model Builder: template table × contract record → `Document`.
//!
//! The builder is a pure function: the same record always yields the same
//! document. Placeholders are resolved in a single left-to-right scan, so
//! braces inside record values are copied through untouched.

use crate::document::template::{
    self, BlockTemplate, BodyTemplate, SectionTemplate, AGENCY_PLACEHOLDERS,
};
use crate::document::{
    BlockContent, BodyBlock, Document, KeyValueRow, Section, SignatureBlock, SignatureColumn,
    TitleBlock,
};
use crate::errors::ComposeError;
use crate::models::contract::ContractRecord;

/// Builds the agreement's document model from a complete record.
///
/// Fails with `InvalidRecord` before producing anything if any required field
/// is blank; the builder never substitutes empty text.
pub fn build_document(record: &ContractRecord) -> Result<Document, ComposeError> {
    record.validate()?;

    let title = TitleBlock {
        title: template::TITLE.to_string(),
        subtitle: fill_placeholders(template::SUBTITLE_TEMPLATE, record)?,
        spacing_after: template::TITLE_SPACING_AFTER,
    };

    let sections = template::SECTIONS
        .iter()
        .map(|t| build_section(t, record))
        .collect::<Result<Vec<_>, _>>()?;

    let signature = SignatureBlock {
        gap_before: template::SIGNATURE_GAP_BEFORE,
        agency: SignatureColumn {
            label: fill_placeholders(template::SIGNATURE_AGENCY_LABEL, record)?,
            mark_line: template::SIGNATURE_MARK_LINE.to_string(),
            printed_name: fill_placeholders(template::SIGNATURE_AGENCY_NAME, record)?,
        },
        client: SignatureColumn {
            label: template::SIGNATURE_CLIENT_LABEL.to_string(),
            mark_line: template::SIGNATURE_MARK_LINE.to_string(),
            printed_name: fill_placeholders(template::SIGNATURE_CLIENT_NAME, record)?,
        },
    };

    Ok(Document {
        letterhead: template::AGENCY_LETTERHEAD.to_string(),
        title,
        sections,
        signature,
        footer_template: template::FOOTER_TEMPLATE,
    })
}

fn build_section(
    section: &SectionTemplate,
    record: &ContractRecord,
) -> Result<Section, ComposeError> {
    let title = match section.number {
        Some(n) => format!("§{n}. {}", section.title),
        None => section.title.to_string(),
    };

    let blocks = section
        .blocks
        .iter()
        .map(|b| build_block(b, record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Section {
        id: section.id,
        number: section.number,
        title,
        blocks,
    })
}

fn build_block(block: &BlockTemplate, record: &ContractRecord) -> Result<BodyBlock, ComposeError> {
    let content = match block.body {
        BodyTemplate::Text(text) => BlockContent::Text(fill_placeholders(text, record)?),
        BodyTemplate::Rows(rows) => BlockContent::Rows(
            rows.iter()
                .map(|(label, value)| {
                    Ok(KeyValueRow {
                        label: fill_placeholders(label, record)?,
                        value: fill_placeholders(value, record)?,
                    })
                })
                .collect::<Result<Vec<_>, ComposeError>>()?,
        ),
    };

    Ok(BodyBlock {
        content,
        spacing_after: block.spacing_after,
    })
}

/// Substitutes `{name}` placeholders from the record and the agency constants.
///
/// An unmatched `{` is copied literally. A name that is neither a record field
/// nor an agency constant is a template bug and fails with `UnknownPlaceholder`.
pub fn fill_placeholders(text: &str, record: &ContractRecord) -> Result<String, ComposeError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return Ok(out);
        };

        let name = &after[..close];
        out.push_str(resolve(name, record)?);
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn resolve<'a>(name: &str, record: &'a ContractRecord) -> Result<&'a str, ComposeError> {
    if let Some(&(_, value)) = AGENCY_PLACEHOLDERS.iter().find(|(key, _)| *key == name) {
        return Ok(value);
    }
    match record.field(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(ComposeError::InvalidRecord {
            field: canonical_field(name),
        }),
        None => Err(ComposeError::UnknownPlaceholder {
            name: name.to_string(),
        }),
    }
}

fn canonical_field(name: &str) -> &'static str {
    crate::models::contract::FIELD_NAMES
        .iter()
        .copied()
        .find(|f| *f == name)
        .unwrap_or("unknown")
}
