//! Interpretation of the allowance spreadsheet grid.
//!
//! The sheet has one header row naming the children and one row per week:
//!
//! ```text
//! Week        | Ava   | Ben
//! 2025-06-02  | $7.00 | 5
//! 06/09/2025  | 7     |
//! ```
//!
//! Every non-empty amount cell becomes one [`AllowanceRecord`]. Cells that
//! cannot be read make the whole grid unusable.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::models::AllowanceRecord;

/// Week column formats, tried in order
const WEEK_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("row {row}: unreadable week start date '{value}'")]
    InvalidWeek { row: usize, value: String },
    #[error("row {row}, column '{child}': unreadable amount '{value}'")]
    InvalidAmount { row: usize, child: String, value: String },
}

/// Turn raw sheet rows into allowance records. Row numbers in errors are
/// 1-based to match what a person sees in the spreadsheet. An empty sheet
/// has no cells and so no records.
pub fn parse_allowance_grid(rows: &[Vec<String>]) -> Result<Vec<AllowanceRecord>, GridError> {
    let Some((header, weeks)) = rows.split_first() else {
        return Ok(Vec::new());
    };
    let children: Vec<Option<&str>> = header
        .iter()
        .skip(1)
        .map(|name| Some(name.trim()).filter(|n| !n.is_empty()))
        .collect();

    let mut records = Vec::new();
    for (index, row) in weeks.iter().enumerate() {
        let row_number = index + 2;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let raw_week = row.first().map(|cell| cell.trim()).unwrap_or_default();
        let week_start_date = parse_week(raw_week).ok_or_else(|| GridError::InvalidWeek {
            row: row_number,
            value: raw_week.to_string(),
        })?;

        for (cell, child) in row.iter().skip(1).zip(children.iter()) {
            let Some(child) = child else { continue };
            if cell.trim().is_empty() {
                continue;
            }
            let amount_earned = parse_amount(cell).ok_or_else(|| GridError::InvalidAmount {
                row: row_number,
                child: child.to_string(),
                value: cell.clone(),
            })?;
            records.push(AllowanceRecord::new(*child, week_start_date, amount_earned));
        }
    }

    Ok(records)
}

fn parse_week(value: &str) -> Option<NaiveDate> {
    WEEK_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Accepts plain decimals as well as currency-formatted cells like `$1,234.50`
fn parse_amount(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let digits: String = unsigned
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let amount = Decimal::from_str(&digits).ok()?;
    Some(if negative { -amount } else { amount })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_one_record_per_non_empty_cell() {
        let rows = grid(&[
            &["Week", "Ava", "Ben"],
            &["2025-06-02", "7", "5"],
            &["2025-06-09", "7", ""],
        ]);

        let records = parse_allowance_grid(&rows).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            AllowanceRecord::new("Ava", NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(), dec!(7))
        );
        assert_eq!(records[1].child_id, "Ben");
        assert_eq!(records[2].week_start_date, NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());
    }

    #[test]
    fn test_short_rows_and_blank_rows_are_skipped() {
        // The Sheets API drops trailing empty cells, so rows can be shorter than the header
        let rows = grid(&[
            &["Week", "Ava", "Ben"],
            &["2025-06-02", "7"],
            &[],
            &["", "", ""],
        ]);

        let records = parse_allowance_grid(&rows).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_us_dates_and_currency_amounts() {
        let rows = grid(&[&["Week", "Ava"], &["06/16/2025", " $1,007.50 "], &["06/23/2025", "-$2.00"]]);

        let records = parse_allowance_grid(&rows).unwrap();
        assert_eq!(records[0].week_start_date, NaiveDate::from_ymd_opt(2025, 6, 16).unwrap());
        assert_eq!(records[0].amount_earned, dec!(1007.50));
        assert_eq!(records[1].amount_earned, dec!(-2.00));
    }

    #[test]
    fn test_unnamed_columns_are_ignored() {
        let rows = grid(&[&["Week", "Ava", "", "Notes"], &["2025-06-02", "7", "99", ""]]);

        let records = parse_allowance_grid(&rows).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].child_id, "Ava");
    }

    #[test]
    fn test_empty_sheet_has_no_records() {
        assert_eq!(parse_allowance_grid(&[]), Ok(Vec::new()));
    }

    #[test]
    fn test_header_only_sheet_is_empty() {
        let rows = grid(&[&["Week", "Ava"]]);
        assert!(parse_allowance_grid(&rows).unwrap().is_empty());
    }

    #[test]
    fn test_bad_week_fails_whole_grid() {
        let rows = grid(&[&["Week", "Ava"], &["2025-06-02", "7"], &["next week", "7"]]);
        assert_eq!(
            parse_allowance_grid(&rows),
            Err(GridError::InvalidWeek {
                row: 3,
                value: "next week".to_string()
            })
        );
    }

    #[test]
    fn test_bad_amount_fails_whole_grid() {
        let rows = grid(&[&["Week", "Ava"], &["2025-06-02", "seven"]]);
        assert_eq!(
            parse_allowance_grid(&rows),
            Err(GridError::InvalidAmount {
                row: 2,
                child: "Ava".to_string(),
                value: "seven".to_string()
            })
        );
    }
}
