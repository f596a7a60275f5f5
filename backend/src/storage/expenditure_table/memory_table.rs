use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use super::{collect_records, ExpenditureItem};
use crate::domain::models::ExpenditureRecord;
use crate::storage::error::StoreUnavailableError;
use crate::storage::traits::ExpenditureStore;

/// Process-local expenditure table. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryExpenditureTable {
    items: RwLock<Vec<ExpenditureItem>>,
}

impl InMemoryExpenditureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items, including ones that are not expenditures
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Result<Vec<ExpenditureItem>, StoreUnavailableError> {
        self.items
            .read()
            .map(|items| items.clone())
            .map_err(|_| StoreUnavailableError::new("in-memory table lock poisoned"))
    }
}

#[async_trait]
impl ExpenditureStore for InMemoryExpenditureTable {
    async fn save_expenditure(&self, record: &ExpenditureRecord) -> Result<(), StoreUnavailableError> {
        let item = ExpenditureItem::from_record(record);
        debug!("Storing item {} / {} in memory", item.pk, item.sk);
        self.items
            .write()
            .map_err(|_| StoreUnavailableError::new("in-memory table lock poisoned"))?
            .push(item);
        Ok(())
    }

    async fn get_expenditures(&self, child_id: &str) -> Result<Vec<ExpenditureRecord>, StoreUnavailableError> {
        collect_records(self.snapshot()?, Some(child_id))
    }

    async fn list_expenditures(&self) -> Result<Vec<ExpenditureRecord>, StoreUnavailableError> {
        collect_records(self.snapshot()?, None)
    }
}
