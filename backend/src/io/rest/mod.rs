//! # REST API Interface Layer
//!
//! HTTP endpoints of the allowance ledger. Handlers translate requests into
//! domain calls and map [`ApiError`](error::ApiError) kinds onto status codes:
//!
//! - `403` when the claimed email is not on the allow-list
//! - `400` for malformed or incomplete submissions, and for refused writes
//! - `503` when the spreadsheet or the expenditure table cannot be read

pub mod dashboard_apis;
pub mod error;
pub mod expenditure_apis;
pub mod mappers;
pub mod page_apis;
pub mod pages;

pub use dashboard_apis::*;
pub use expenditure_apis::*;
pub use page_apis::*;
