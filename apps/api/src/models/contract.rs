use serde::{Deserialize, Serialize};

use crate::errors::ComposeError;

/// Names of the 13 fields every contract record must carry, in the order the
/// document introduces them.
pub const FIELD_NAMES: [&str; 13] = [
    "contract_date",
    "client_name",
    "client_address",
    "client_phone",
    "client_email",
    "destination",
    "start_date",
    "end_date",
    "participants",
    "transport",
    "accommodation",
    "price",
    "currency",
];

/// Number of lines a free-text booking message must contain (every field
/// except `contract_date`, which the adapter stamps itself).
pub const MESSAGE_LINE_COUNT: usize = 12;

/// Trip-booking facts consumed by the composition engine.
///
/// All values are opaque strings: dates, prices and participant counts are
/// neither parsed nor range-checked. Fields missing from incoming JSON
/// deserialize as empty so `validate` can name them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractRecord {
    pub contract_date: String,
    pub client_name: String,
    pub client_address: String,
    pub client_phone: String,
    pub client_email: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub participants: String,
    pub transport: String,
    pub accommodation: String,
    pub price: String,
    pub currency: String,
}

impl ContractRecord {
    /// Looks up a field by its canonical name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "contract_date" => &self.contract_date,
            "client_name" => &self.client_name,
            "client_address" => &self.client_address,
            "client_phone" => &self.client_phone,
            "client_email" => &self.client_email,
            "destination" => &self.destination,
            "start_date" => &self.start_date,
            "end_date" => &self.end_date,
            "participants" => &self.participants,
            "transport" => &self.transport,
            "accommodation" => &self.accommodation,
            "price" => &self.price,
            "currency" => &self.currency,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Returns the first required field that is empty or whitespace-only.
    pub fn missing_field(&self) -> Option<&'static str> {
        FIELD_NAMES
            .iter()
            .copied()
            .find(|name| self.field(name).map_or(true, |v| v.trim().is_empty()))
    }

    /// Fails with `InvalidRecord` naming the first missing field.
    pub fn validate(&self) -> Result<(), ComposeError> {
        match self.missing_field() {
            Some(field) => Err(ComposeError::InvalidRecord { field }),
            None => Ok(()),
        }
    }

    /// Fills `contract_date` when the caller left it blank.
    pub fn with_default_contract_date(mut self, today: impl FnOnce() -> String) -> Self {
        if self.contract_date.trim().is_empty() {
            self.contract_date = today();
        }
        self
    }

    /// Parses the line-per-field booking message agents paste into chat.
    ///
    /// Blank lines are skipped and each line is trimmed. Lines beyond the
    /// twelfth are ignored. Returns the number of lines found when fewer than
    /// `MESSAGE_LINE_COUNT` are present.
    pub fn from_message(text: &str, contract_date: String) -> Result<Self, usize> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.len() < MESSAGE_LINE_COUNT {
            return Err(lines.len());
        }

        Ok(ContractRecord {
            contract_date,
            client_name: lines[0].to_string(),
            client_address: lines[1].to_string(),
            client_phone: lines[2].to_string(),
            client_email: lines[3].to_string(),
            destination: lines[4].to_string(),
            start_date: lines[5].to_string(),
            end_date: lines[6].to_string(),
            participants: lines[7].to_string(),
            transport: lines[8].to_string(),
            accommodation: lines[9].to_string(),
            price: lines[10].to_string(),
            currency: lines[11].to_string(),
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_record() -> ContractRecord {
    ContractRecord {
        contract_date: "01.08.2023".to_string(),
        client_name: "John Smith".to_string(),
        client_address: "123 Main St, New York".to_string(),
        client_phone: "+1 234 567 890".to_string(),
        client_email: "john@example.com".to_string(),
        destination: "Italy".to_string(),
        start_date: "15.08.2023".to_string(),
        end_date: "25.08.2023".to_string(),
        participants: "2".to_string(),
        transport: "Flight from Warsaw to Rome".to_string(),
        accommodation: "Hotel Roma, double room".to_string(),
        price: "2500".to_string(),
        currency: "EUR".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_MESSAGE: &str = "John Smith\n\
        123 Main St, New York\n\
        +1 234 567 890\n\
        john@example.com\n\
        Italy\n\
        15.08.2023\n\
        25.08.2023\n\
        2\n\
        Flight from Warsaw to Rome\n\
        Hotel Roma, double room\n\
        2500\n\
        EUR";

    #[test]
    fn test_every_field_name_resolves() {
        let record = sample_record();
        for name in FIELD_NAMES {
            assert!(record.field(name).is_some(), "{name} should resolve");
        }
        assert_eq!(record.field("nip"), None);
    }

    #[test]
    fn test_complete_record_validates() {
        assert_eq!(sample_record().validate(), Ok(()));
    }

    #[test]
    fn test_blank_field_is_reported() {
        let mut record = sample_record();
        record.accommodation = "   ".to_string();
        assert_eq!(
            record.validate(),
            Err(ComposeError::InvalidRecord {
                field: "accommodation"
            })
        );
    }

    #[test]
    fn test_missing_json_field_deserializes_empty() {
        let record: ContractRecord =
            serde_json::from_str(r#"{"client_name": "Ann Lee"}"#).unwrap();
        assert_eq!(record.client_name, "Ann Lee");
        assert_eq!(record.missing_field(), Some("contract_date"));
    }

    #[test]
    fn test_default_contract_date_only_fills_blank() {
        let stamped = ContractRecord::default().with_default_contract_date(|| "02.02.2024".into());
        assert_eq!(stamped.contract_date, "02.02.2024");

        let kept = sample_record().with_default_contract_date(|| "02.02.2024".into());
        assert_eq!(kept.contract_date, "01.08.2023");
    }

    #[test]
    fn test_from_message_maps_lines_in_order() {
        let record =
            ContractRecord::from_message(SAMPLE_MESSAGE, "01.08.2023".to_string()).unwrap();
        assert_eq!(record, sample_record());
    }

    #[test]
    fn test_from_message_skips_blank_lines() {
        let padded = SAMPLE_MESSAGE.replace('\n', "\n\n  ");
        let record = ContractRecord::from_message(&padded, "01.08.2023".to_string()).unwrap();
        assert_eq!(record.currency, "EUR");
        assert_eq!(record.client_address, "123 Main St, New York");
    }

    #[test]
    fn test_from_message_too_few_lines() {
        let short = "John Smith\nItaly\n2";
        assert_eq!(
            ContractRecord::from_message(short, "01.08.2023".to_string()),
            Err(3)
        );
    }
}
