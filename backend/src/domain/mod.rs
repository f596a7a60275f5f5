//! # Domain Module
//!
//! Business logic of the allowance ledger, independent of HTTP and of any
//! particular storage backend.
//!
//! - **balance_service**: sums earned minus spent per child, on demand
//! - **expenditure_service**: stamps and appends expenditures, reads them back
//! - **auth_service**: static allow-list check for write requests
//! - **models**: allowance, expenditure and balance records
//!
//! ## Business Rules
//!
//! - A balance is `total_earned - total_spent`, recomputed on every request
//!   and never clamped at zero
//! - Children who only appear in expenditures have nothing earned
//! - Expenditures are append-only; duplicates are kept
//! - Amounts carry no sign rule

pub mod auth_service;
pub mod balance_service;
pub mod error;
pub mod expenditure_service;
pub mod models;

pub use auth_service::AuthService;
pub use balance_service::{aggregate_balances, BalanceService};
pub use error::LedgerError;
pub use expenditure_service::ExpenditureService;
