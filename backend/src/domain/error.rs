use thiserror::Error;

use super::models::ValidationError;
use crate::storage::{SourceUnavailableError, StoreUnavailableError};

/// Every way a ledger operation can fail. Storage errors pass through
/// unchanged so the io layer can map each kind to its own status.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    SourceUnavailable(#[from] SourceUnavailableError),
    #[error(transparent)]
    StoreUnavailable(#[from] StoreUnavailableError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Stored amounts add up to more than a `Decimal` can hold
    #[error("totals for '{child_id}' are out of range")]
    TotalsOverflow { child_id: String },
}
