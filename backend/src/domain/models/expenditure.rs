//! Domain models for recorded and not-yet-recorded expenditures.
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Calendar format accepted for the day of an expenditure
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An expenditure as held by the store, keyed by `(child_id, recorded_at)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenditureRecord {
    pub child_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub recorded_at: DateTime<Utc>,
}

/// Reasons a submitted expenditure is rejected before reaching the store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// A validated expenditure submission, not yet stamped or stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpenditure {
    pub child_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
}

impl NewExpenditure {
    /// Check the raw submission fields.
    ///
    /// Text fields are trimmed and must not be blank. The amount carries no
    /// sign rule: zero and negative amounts are accepted as submitted.
    pub fn parse(
        child_id: Option<&str>,
        amount: Option<Decimal>,
        description: Option<&str>,
        date: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let child_id = required_text(child_id, "child")?;
        let amount = amount.ok_or(ValidationError::MissingField("amount"))?;
        let description = required_text(description, "description")?;
        let raw_date = required_text(date, "date")?;
        let date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(raw_date.clone()))?;

        Ok(Self {
            child_id,
            amount,
            date,
            description,
        })
    }

    /// Stamp the submission with the moment it is recorded
    pub fn into_record(self, recorded_at: DateTime<Utc>) -> ExpenditureRecord {
        ExpenditureRecord {
            child_id: self.child_id,
            amount: self.amount,
            date: self.date,
            description: self.description,
            recorded_at,
        }
    }
}

fn required_text(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}
