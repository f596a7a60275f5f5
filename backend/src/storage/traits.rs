//! # Storage Traits
//!
//! The two seams between the domain layer and the outside world. The domain
//! holds these as `Arc<dyn ...>` so any backend can be injected at startup
//! or swapped for a fake in tests.

use async_trait::async_trait;

use super::error::{SourceUnavailableError, StoreUnavailableError};
use crate::domain::models::{AllowanceRecord, ExpenditureRecord};

/// Read-only access to the weekly allowance grid
#[async_trait]
pub trait AllowanceSource: Send + Sync {
    /// Fetch every (child, week) amount currently present in the source.
    ///
    /// Fails as a whole if the source is unreachable or any cell is malformed.
    async fn get_allowance_data(&self) -> Result<Vec<AllowanceRecord>, SourceUnavailableError>;
}

/// Append-only expenditure table
#[async_trait]
pub trait ExpenditureStore: Send + Sync {
    /// Append one record. There is no idempotency key: saving the same
    /// record twice stores it twice.
    async fn save_expenditure(&self, record: &ExpenditureRecord) -> Result<(), StoreUnavailableError>;

    /// All records for one child in insertion order
    async fn get_expenditures(&self, child_id: &str) -> Result<Vec<ExpenditureRecord>, StoreUnavailableError>;

    /// All records for every child in insertion order
    async fn list_expenditures(&self) -> Result<Vec<ExpenditureRecord>, StoreUnavailableError>;
}
