//! # Storage Module
//!
//! Data access for the two external collaborators of the ledger:
//!
//! - **Allowance sources** (read-only): the Google Sheets client, a CSV
//!   export reader and a static in-memory source.
//! - **Expenditure tables** (append-only): a CSV file table and an in-memory
//!   table, both using the `CHILD#` / `EXPENDITURE#` key layout.
//!
//! The domain layer only sees the [`AllowanceSource`] and
//! [`ExpenditureStore`] traits.

pub mod allowance_grid;
pub mod csv_allowance;
pub mod error;
pub mod expenditure_table;
pub mod sheets;
pub mod static_allowance;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use csv_allowance::CsvAllowanceSource;
pub use error::{SourceUnavailableError, StoreUnavailableError};
pub use expenditure_table::{CsvExpenditureTable, InMemoryExpenditureTable};
pub use sheets::{SheetsAllowanceSource, SheetsConfig, SheetsCredential};
pub use static_allowance::StaticAllowanceSource;
pub use traits::{AllowanceSource, ExpenditureStore};
