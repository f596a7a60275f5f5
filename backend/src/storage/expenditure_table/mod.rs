//! # Expenditure Table
//!
//! Expenditures are stored as items of a single key-value table:
//!
//! | attribute     | value                                        |
//! |---------------|----------------------------------------------|
//! | `pk`          | `CHILD#{child_id}`                           |
//! | `sk`          | `EXPENDITURE#{recorded_at, RFC 3339, micros}` |
//! | `amount`      | decimal string                               |
//! | `date`        | `YYYY-MM-DD`                                 |
//! | `description` | free text                                    |
//! | `created_at`  | RFC 3339 timestamp                           |
//!
//! Items whose sort key does not carry the `EXPENDITURE#` prefix belong to
//! other entity types and are skipped on read.

pub mod csv_table;
pub mod memory_table;

pub use csv_table::CsvExpenditureTable;
pub use memory_table::InMemoryExpenditureTable;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::StoreUnavailableError;
use crate::domain::models::expenditure::DATE_FORMAT;
use crate::domain::models::ExpenditureRecord;

pub const PARTITION_PREFIX: &str = "CHILD#";
pub const SORT_PREFIX: &str = "EXPENDITURE#";

/// Primary key of one expenditure item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenditureKey {
    pub child_id: String,
    pub recorded_at: DateTime<Utc>,
}

impl ExpenditureKey {
    pub fn new(child_id: impl Into<String>, recorded_at: DateTime<Utc>) -> Self {
        Self {
            child_id: child_id.into(),
            recorded_at,
        }
    }

    pub fn partition_key_for(child_id: &str) -> String {
        format!("{PARTITION_PREFIX}{child_id}")
    }

    pub fn partition_key(&self) -> String {
        Self::partition_key_for(&self.child_id)
    }

    pub fn sort_key(&self) -> String {
        format!("{SORT_PREFIX}{}", format_timestamp(&self.recorded_at))
    }

    /// Parse a `(pk, sk)` pair. Returns `None` for keys of other entity types
    /// and for timestamps that cannot be read.
    pub fn parse(partition_key: &str, sort_key: &str) -> Option<Self> {
        let child_id = partition_key.strip_prefix(PARTITION_PREFIX)?;
        let timestamp = sort_key.strip_prefix(SORT_PREFIX)?;
        let recorded_at = DateTime::parse_from_rfc3339(timestamp).ok()?.with_timezone(&Utc);
        Some(Self::new(child_id, recorded_at))
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// One row of the table as it is laid out on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenditureItem {
    pub pk: String,
    pub sk: String,
    pub amount: String,
    pub date: String,
    pub description: String,
    pub created_at: String,
}

impl ExpenditureItem {
    pub fn from_record(record: &ExpenditureRecord) -> Self {
        let key = ExpenditureKey::new(record.child_id.clone(), record.recorded_at);
        Self {
            pk: key.partition_key(),
            sk: key.sort_key(),
            amount: record.amount.to_string(),
            date: record.date.format(DATE_FORMAT).to_string(),
            description: record.description.clone(),
            created_at: format_timestamp(&record.recorded_at),
        }
    }

    pub fn is_expenditure(&self) -> bool {
        self.pk.starts_with(PARTITION_PREFIX) && self.sk.starts_with(SORT_PREFIX)
    }

    /// Convert back into a domain record.
    ///
    /// Items of other entity types yield `Ok(None)`. An expenditure item with
    /// unreadable attributes means the table is corrupt and is reported as
    /// unavailable.
    pub fn into_record(self) -> Result<Option<ExpenditureRecord>, StoreUnavailableError> {
        if !self.is_expenditure() {
            return Ok(None);
        }

        let key = ExpenditureKey::parse(&self.pk, &self.sk).ok_or_else(|| {
            StoreUnavailableError::new(format!("unreadable item key {} / {}", self.pk, self.sk))
        })?;
        let amount = Decimal::from_str(&self.amount).map_err(|e| {
            StoreUnavailableError::with_cause(format!("unreadable amount in item {}", self.sk), e)
        })?;
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|e| {
            StoreUnavailableError::with_cause(format!("unreadable date in item {}", self.sk), e)
        })?;

        Ok(Some(ExpenditureRecord {
            child_id: key.child_id,
            amount,
            date,
            description: self.description,
            recorded_at: key.recorded_at,
        }))
    }
}

/// Decode items and keep the expenditures belonging to `child_id`, or all
/// expenditures when no child is given.
pub(crate) fn collect_records(
    items: impl IntoIterator<Item = ExpenditureItem>,
    child_id: Option<&str>,
) -> Result<Vec<ExpenditureRecord>, StoreUnavailableError> {
    let partition = child_id.map(ExpenditureKey::partition_key_for);
    let mut records = Vec::new();

    for item in items {
        if let Some(partition) = &partition {
            if &item.pk != partition {
                continue;
            }
        }
        if let Some(record) = item.into_record()? {
            records.push(record);
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_record() -> ExpenditureRecord {
        ExpenditureRecord {
            child_id: "Ava".to_string(),
            amount: dec!(5.00),
            date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            description: "Comic book".to_string(),
            recorded_at: Utc.with_ymd_and_hms(2025, 6, 14, 15, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_key_layout() {
        let key = ExpenditureKey::new("Ava", Utc.with_ymd_and_hms(2025, 6, 14, 15, 30, 0).unwrap());
        assert_eq!(key.partition_key(), "CHILD#Ava");
        assert_eq!(key.sort_key(), "EXPENDITURE#2025-06-14T15:30:00.000000Z");
    }

    #[test]
    fn test_key_parse_rejects_other_entities() {
        assert!(ExpenditureKey::parse("CHILD#Ava", "PROFILE#main").is_none());
        assert!(ExpenditureKey::parse("USER#Ava", "EXPENDITURE#2025-06-14T15:30:00Z").is_none());
        assert!(ExpenditureKey::parse("CHILD#Ava", "EXPENDITURE#yesterday").is_none());
    }

    #[test]
    fn test_item_attributes() {
        let item = ExpenditureItem::from_record(&sample_record());
        assert_eq!(item.pk, "CHILD#Ava");
        assert_eq!(item.amount, "5.00");
        assert_eq!(item.date, "2025-06-14");
        assert_eq!(item.created_at, "2025-06-14T15:30:00.000000Z");
        assert_eq!(item.into_record().unwrap(), Some(sample_record()));
    }

    #[test]
    fn test_item_with_bad_amount_is_store_error() {
        let mut item = ExpenditureItem::from_record(&sample_record());
        item.amount = "five".to_string();
        assert!(item.into_record().is_err());
    }

    #[test]
    fn test_collect_records_filters_by_partition_and_entity() {
        let mut other_child = sample_record();
        other_child.child_id = "Ben".to_string();
        let mut profile = ExpenditureItem::from_record(&sample_record());
        profile.sk = "PROFILE#main".to_string();

        let items = vec![
            ExpenditureItem::from_record(&sample_record()),
            ExpenditureItem::from_record(&other_child),
            profile,
        ];

        let ava = collect_records(items.clone(), Some("Ava")).unwrap();
        assert_eq!(ava, vec![sample_record()]);

        let all = collect_records(items, None).unwrap();
        assert_eq!(all.len(), 2);
    }
}
