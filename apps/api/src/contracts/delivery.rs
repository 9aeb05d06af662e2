//! Delivery naming: artifact handles, suggested file names and the default
//! contract date. Persistence and transport belong to the caller.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

use crate::contracts::composer::{ComposedContract, CompositionMetadata};

/// Date format printed in the agreement's subtitle.
pub const CONTRACT_DATE_FORMAT: &str = "%d.%m.%Y";
const FILENAME_STAMP_FORMAT: &str = "%Y%m%d%H%M";

/// Handle and naming for one composed agreement.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryTicket {
    pub document_id: Uuid,
    pub filename: String,
    pub metadata: CompositionMetadata,
}

impl DeliveryTicket {
    pub fn new(
        composed: &ComposedContract,
        client_name: &str,
        extension: &str,
        at: NaiveDateTime,
    ) -> Self {
        Self {
            document_id: Uuid::new_v4(),
            filename: suggested_filename(client_name, at, extension),
            metadata: composed.metadata(),
        }
    }
}

/// Today's date in the agreement's `dd.mm.YYYY` form, local time.
pub fn today_contract_date() -> String {
    Local::now().format(CONTRACT_DATE_FORMAT).to_string()
}

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// `contract_<Client_Name>_<YYYYmmddHHMM>.<ext>`
///
/// Whitespace runs in the name become `_`; anything that is not alphanumeric,
/// `-` or `_` is dropped so the result is safe as a path component.
pub fn suggested_filename(client_name: &str, at: NaiveDateTime, extension: &str) -> String {
    let name: String = client_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    let name = if name.is_empty() { "client".to_string() } else { name };

    format!(
        "contract_{name}_{}.{extension}",
        at.format(FILENAME_STAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 8, 1)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_filename_joins_name_and_timestamp() {
        assert_eq!(
            suggested_filename("John Smith", at(), "txt"),
            "contract_John_Smith_202308010905.txt"
        );
    }

    #[test]
    fn test_filename_strips_path_characters() {
        assert_eq!(
            suggested_filename("  Anna  Nowak/../x ", at(), "pdf"),
            "contract_Anna_Nowakx_202308010905.pdf"
        );
    }

    #[test]
    fn test_filename_keeps_non_ascii_letters() {
        assert_eq!(
            suggested_filename("Łukasz Żółw", at(), "txt"),
            "contract_Łukasz_Żółw_202308010905.txt"
        );
    }

    #[test]
    fn test_filename_falls_back_for_empty_name() {
        assert_eq!(
            suggested_filename("///", at(), "txt"),
            "contract_client_202308010905.txt"
        );
    }

    #[test]
    fn test_today_contract_date_shape() {
        let date = today_contract_date();
        assert_eq!(date.len(), 10);
        assert!(NaiveDate::parse_from_str(&date, CONTRACT_DATE_FORMAT).is_ok());
    }
}
