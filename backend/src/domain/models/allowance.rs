//! Domain model for one week of earned allowance.
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One non-empty cell of the allowance sheet: what a child earned in a week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowanceRecord {
    pub child_id: String,
    pub week_start_date: NaiveDate,
    pub amount_earned: Decimal,
}

impl AllowanceRecord {
    pub fn new(child_id: impl Into<String>, week_start_date: NaiveDate, amount_earned: Decimal) -> Self {
        Self {
            child_id: child_id.into(),
            week_start_date,
            amount_earned,
        }
    }
}
