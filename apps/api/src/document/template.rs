//! Static template text for the tourist-services agreement.
//!
//! Every piece of fixed wording lives here. Record values and agency constants
//! are referenced by `{placeholder}` name and substituted by the builder, so
//! the clause language never passes through ad-hoc string formatting.

// ────────────────────────────────────────────────────────────────────────────
// Agency identity
// ────────────────────────────────────────────────────────────────────────────

pub const AGENCY_LETTERHEAD: &str = "EUROLUXE Sp. z o.o.";
pub const AGENCY_NAME: &str = "Euroluxe Sp. z o.o.";
pub const AGENCY_ADDRESS: &str = "Dzielna 7, 00-154 Warsaw, Poland";
pub const AGENCY_NIP: &str = "5279162645";
pub const AGENCY_REPRESENTATIVE: &str = "Vadym Shevchenko, Manager";

/// Placeholders resolved from the agency constants rather than the record.
pub const AGENCY_PLACEHOLDERS: [(&str, &str); 4] = [
    ("agency_name", AGENCY_NAME),
    ("agency_address", AGENCY_ADDRESS),
    ("agency_nip", AGENCY_NIP),
    ("agency_representative", AGENCY_REPRESENTATIVE),
];

// ────────────────────────────────────────────────────────────────────────────
// Title block, footer, signature
// ────────────────────────────────────────────────────────────────────────────

pub const TITLE: &str = "AGREEMENT FOR THE PROVISION OF TOURIST SERVICES";
pub const SUBTITLE_TEMPLATE: &str = "concluded on {contract_date} between:";
pub const TITLE_SPACING_AFTER: f32 = 10.0;

/// `{page}` is filled by the layout engine, not the builder.
pub const FOOTER_TEMPLATE: &str = "Page {page}";

pub const SIGNATURE_GAP_BEFORE: f32 = 15.0;
pub const SIGNATURE_AGENCY_LABEL: &str = "For and on behalf of {agency_name}";
pub const SIGNATURE_CLIENT_LABEL: &str = "Client:";
pub const SIGNATURE_MARK_LINE: &str = "___________________________";
pub const SIGNATURE_AGENCY_NAME: &str = "{agency_representative}";
pub const SIGNATURE_CLIENT_NAME: &str = "{client_name}";

// ────────────────────────────────────────────────────────────────────────────
// Section templates
// ────────────────────────────────────────────────────────────────────────────

/// Body of one block within a section template.
#[derive(Debug, Clone, Copy)]
pub enum BodyTemplate {
    /// Free text, wrapped to the content width.
    Text(&'static str),
    /// Label/value rows; both sides may contain placeholders.
    Rows(&'static [(&'static str, &'static str)]),
}

#[derive(Debug, Clone, Copy)]
pub struct BlockTemplate {
    pub body: BodyTemplate,
    /// Vertical gap left after the block.
    pub spacing_after: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct SectionTemplate {
    pub id: &'static str,
    /// Clause number (§n); `None` for the party preamble.
    pub number: Option<u8>,
    pub title: &'static str,
    pub blocks: &'static [BlockTemplate],
}

const SECTION_GAP: f32 = 5.0;
const WIDE_GAP: f32 = 10.0;

const PAYMENT_TERMS: &str = "\
1. The total price of the tourist trip is: {price} {currency}\n\
2. The price includes:\n   \
- transport\n   \
- accommodation\n   \
- meals\n   \
- care of a tour representative (resident)\n\
3. The Client agrees to transfer the full amount to the account provided by the company \
no later than 3 days after signing this agreement.\n\
4. In certain cases, due to technical or banking limitations (including transaction limits), \
our company reserves the right to provide multiple official accounts for processing the payment.";

const RIGHTS_AND_OBLIGATIONS: &str = "\
1. The travel agency undertakes to properly provide the services as described.\n\
2. The Client agrees to comply with the rules and laws of the destination country.\n\
3. The Client has the right to:\n   \
- receive all necessary information prior to departure\n   \
- file a complaint\n   \
- transfer the agreement to another person (with the agency's consent)";

const TERMINATION: &str = "\
1. The Client may withdraw from the agreement before the trip begins.\n\
2. The customer may cancel the trip no later than 3 days prior to departure.\n";

const COMPLAINTS: &str = "\
1. Complaints must be reported by residents in text format via Telegram messenger within 30 days.\n\
2. The travel agency must respond within 14 days.";

const INSURANCE: &str =
    "1. The Client is covered by basic accident and medical insurance (NNW and KL).";

const FINAL_PROVISIONS: &str = "\
1. Any matters not covered by this agreement shall be governed by the provisions of the \
Polish Civil Code and the Act on Tourist Events.\n\
2. The agreement was concluded electronically and sent to both parties by telegram messenger.\n\
3. The Client confirms that they have read and accept the terms of this agreement.";

/// Sections in document order: the two party blocks, then clauses §1–§7.
pub static SECTIONS: [SectionTemplate; 9] = [
    SectionTemplate {
        id: "agency",
        number: None,
        title: "Travel agency:",
        blocks: &[BlockTemplate {
            body: BodyTemplate::Rows(&[
                ("Name", "{agency_name}"),
                ("Address", "{agency_address}"),
                ("Tax ID (NIP)", "{agency_nip}"),
                ("Represented by", "{agency_representative}"),
            ]),
            spacing_after: SECTION_GAP,
        }],
    },
    SectionTemplate {
        id: "client",
        number: None,
        title: "and the Client:",
        blocks: &[BlockTemplate {
            body: BodyTemplate::Rows(&[
                ("Full name", "{client_name}"),
                ("Residential address", "{client_address}"),
                ("Phone", "{client_phone}"),
                ("Email", "{client_email}"),
            ]),
            spacing_after: WIDE_GAP,
        }],
    },
    SectionTemplate {
        id: "subject",
        number: Some(1),
        title: "SUBJECT OF THE AGREEMENT",
        blocks: &[
            BlockTemplate {
                body: BodyTemplate::Text(
                    "1. The subject of this agreement is the organization of a tourist trip \
                     with the following details:",
                ),
                spacing_after: SECTION_GAP,
            },
            BlockTemplate {
                body: BodyTemplate::Rows(&[
                    ("Destination", "{destination}"),
                    ("Date", "from {start_date} to {end_date}"),
                    ("Number of participants", "{participants}"),
                    ("Means of transport", "{transport}"),
                    ("Accommodation", "{accommodation}"),
                ]),
                spacing_after: 0.0,
            },
            BlockTemplate {
                body: BodyTemplate::Text(
                    "2. The detailed trip itinerary constitutes Annex No. 1 to this agreement.",
                ),
                spacing_after: WIDE_GAP,
            },
        ],
    },
    SectionTemplate {
        id: "payment",
        number: Some(2),
        title: "PRICE AND PAYMENT TERMS",
        blocks: &[BlockTemplate {
            body: BodyTemplate::Text(PAYMENT_TERMS),
            spacing_after: SECTION_GAP,
        }],
    },
    SectionTemplate {
        id: "rights",
        number: Some(3),
        title: "RIGHTS AND OBLIGATIONS OF THE PARTIES",
        blocks: &[BlockTemplate {
            body: BodyTemplate::Text(RIGHTS_AND_OBLIGATIONS),
            spacing_after: SECTION_GAP,
        }],
    },
    SectionTemplate {
        id: "termination",
        number: Some(4),
        title: "TERMINATION AND CANCELLATION",
        blocks: &[BlockTemplate {
            body: BodyTemplate::Text(TERMINATION),
            spacing_after: SECTION_GAP,
        }],
    },
    SectionTemplate {
        id: "complaints",
        number: Some(5),
        title: "COMPLAINTS",
        blocks: &[BlockTemplate {
            body: BodyTemplate::Text(COMPLAINTS),
            spacing_after: SECTION_GAP,
        }],
    },
    SectionTemplate {
        id: "insurance",
        number: Some(6),
        title: "INSURANCE AND GUARANTEE",
        blocks: &[BlockTemplate {
            body: BodyTemplate::Text(INSURANCE),
            spacing_after: SECTION_GAP,
        }],
    },
    SectionTemplate {
        id: "final",
        number: Some(7),
        title: "FINAL PROVISIONS",
        blocks: &[BlockTemplate {
            body: BodyTemplate::Text(FINAL_PROVISIONS),
            spacing_after: SECTION_GAP,
        }],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clauses_numbered_one_to_seven_in_order() {
        let numbers: Vec<u8> = SECTIONS.iter().filter_map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_party_sections_precede_clauses() {
        assert_eq!(SECTIONS[0].id, "agency");
        assert_eq!(SECTIONS[1].id, "client");
        assert!(SECTIONS[..2].iter().all(|s| s.number.is_none()));
    }

    #[test]
    fn test_section_ids_unique() {
        let mut ids: Vec<&str> = SECTIONS.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SECTIONS.len());
    }

    #[test]
    fn test_continued_lines_keep_word_spacing() {
        assert!(PAYMENT_TERMS.contains("by the company no later"));
        assert!(PAYMENT_TERMS.contains("\n   - meals\n"));
        assert!(TERMINATION.ends_with('\n'));
    }
}
