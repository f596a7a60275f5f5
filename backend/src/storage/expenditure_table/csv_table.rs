use std::fs::{self, OpenOptions};
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use csv::{Reader, WriterBuilder};
use tracing::{debug, info};

use super::{collect_records, ExpenditureItem};
use crate::domain::models::ExpenditureRecord;
use crate::storage::error::StoreUnavailableError;
use crate::storage::traits::ExpenditureStore;

const HEADER: [&str; 6] = ["pk", "sk", "amount", "date", "description", "created_at"];

/// File-backed expenditure table: one CSV row per item, appended in order
pub struct CsvExpenditureTable {
    table_name: String,
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl CsvExpenditureTable {
    /// Open the table file, creating it (and its directory) with a header
    /// row if it does not exist yet.
    pub fn open(table_name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self, StoreUnavailableError> {
        let table_name = table_name.into();
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreUnavailableError::with_cause(format!("cannot create directory {}", parent.display()), e)
            })?;
        }

        if !path.exists() {
            let mut writer = csv::Writer::from_path(&path).map_err(|e| {
                StoreUnavailableError::with_cause(format!("cannot create table file {}", path.display()), e)
            })?;
            writer
                .write_record(HEADER)
                .and_then(|_| writer.flush().map_err(csv::Error::from))
                .map_err(|e| StoreUnavailableError::with_cause("cannot write table header", e))?;
            info!("Created expenditure table '{}' at {}", table_name, path.display());
        } else {
            info!("Opened expenditure table '{}' at {}", table_name, path.display());
        }

        Ok(Self {
            table_name,
            path,
            append_lock: Mutex::new(()),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn read_items(&self) -> Result<Vec<ExpenditureItem>, StoreUnavailableError> {
        let mut reader = Reader::from_path(&self.path).map_err(|e| {
            StoreUnavailableError::with_cause(format!("cannot open table file {}", self.path.display()), e)
        })?;

        let items = reader
            .deserialize()
            .collect::<Result<Vec<ExpenditureItem>, csv::Error>>()
            .map_err(|e| StoreUnavailableError::with_cause(format!("cannot read table '{}'", self.table_name), e))?;

        debug!("Read {} items from table '{}'", items.len(), self.table_name);
        Ok(items)
    }

    fn append_item(&self, item: &ExpenditureItem) -> Result<(), StoreUnavailableError> {
        let _guard = self
            .append_lock
            .lock()
            .map_err(|_| StoreUnavailableError::new("table append lock poisoned"))?;

        let file = OpenOptions::new().append(true).open(&self.path).map_err(|e| {
            StoreUnavailableError::with_cause(format!("cannot open table file {}", self.path.display()), e)
        })?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));
        writer
            .serialize(item)
            .map_err(|e| StoreUnavailableError::with_cause("cannot encode item", e))?;
        writer
            .flush()
            .map_err(|e| StoreUnavailableError::with_cause(format!("cannot append to table '{}'", self.table_name), e))?;

        Ok(())
    }
}

#[async_trait]
impl ExpenditureStore for CsvExpenditureTable {
    async fn save_expenditure(&self, record: &ExpenditureRecord) -> Result<(), StoreUnavailableError> {
        let item = ExpenditureItem::from_record(record);
        self.append_item(&item)?;
        info!("Stored item {} / {} in table '{}'", item.pk, item.sk, self.table_name);
        Ok(())
    }

    async fn get_expenditures(&self, child_id: &str) -> Result<Vec<ExpenditureRecord>, StoreUnavailableError> {
        collect_records(self.read_items()?, Some(child_id))
    }

    async fn list_expenditures(&self) -> Result<Vec<ExpenditureRecord>, StoreUnavailableError> {
        collect_records(self.read_items()?, None)
    }
}
