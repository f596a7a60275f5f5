//! Fakes for exercising failure paths of the storage seams.

use async_trait::async_trait;

use super::error::{SourceUnavailableError, StoreUnavailableError};
use super::traits::{AllowanceSource, ExpenditureStore};
use crate::domain::models::{AllowanceRecord, ExpenditureRecord};

/// Allowance source whose spreadsheet can never be reached
pub struct UnreachableAllowanceSource;

#[async_trait]
impl AllowanceSource for UnreachableAllowanceSource {
    async fn get_allowance_data(&self) -> Result<Vec<AllowanceRecord>, SourceUnavailableError> {
        Err(SourceUnavailableError::new("spreadsheet unreachable"))
    }
}

/// Expenditure store that refuses every read and write
pub struct UnreachableExpenditureStore;

#[async_trait]
impl ExpenditureStore for UnreachableExpenditureStore {
    async fn save_expenditure(&self, _record: &ExpenditureRecord) -> Result<(), StoreUnavailableError> {
        Err(StoreUnavailableError::new("table unreachable"))
    }

    async fn get_expenditures(&self, _child_id: &str) -> Result<Vec<ExpenditureRecord>, StoreUnavailableError> {
        Err(StoreUnavailableError::new("table unreachable"))
    }

    async fn list_expenditures(&self) -> Result<Vec<ExpenditureRecord>, StoreUnavailableError> {
        Err(StoreUnavailableError::new("table unreachable"))
    }
}
