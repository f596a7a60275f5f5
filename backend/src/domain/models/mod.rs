//! Domain models for allowances, expenditures and derived balances.

pub mod allowance;
pub mod balance;
pub mod expenditure;

pub use allowance::AllowanceRecord;
pub use balance::Balance;
pub use expenditure::{ExpenditureRecord, NewExpenditure, ValidationError};
