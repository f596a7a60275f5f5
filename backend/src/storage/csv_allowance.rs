//! Allowance source backed by a CSV export of the allowance sheet.
use std::path::PathBuf;

use async_trait::async_trait;
use csv::ReaderBuilder;
use tracing::{info, warn};

use super::allowance_grid::parse_allowance_grid;
use super::error::SourceUnavailableError;
use super::traits::AllowanceSource;
use crate::domain::models::AllowanceRecord;

pub struct CsvAllowanceSource {
    path: PathBuf,
}

impl CsvAllowanceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_rows(&self) -> Result<Vec<Vec<String>>, SourceUnavailableError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| {
                SourceUnavailableError::with_cause(format!("cannot open allowance export {}", self.path.display()), e)
            })?;

        reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()
            .map_err(|e| SourceUnavailableError::with_cause("cannot read allowance export", e))
    }
}

#[async_trait]
impl AllowanceSource for CsvAllowanceSource {
    async fn get_allowance_data(&self) -> Result<Vec<AllowanceRecord>, SourceUnavailableError> {
        info!("Reading allowance export {}", self.path.display());

        let rows = self.read_rows()?;
        let records = parse_allowance_grid(&rows).map_err(|e| {
            warn!("Allowance export is misconfigured: {e}");
            SourceUnavailableError::with_cause("allowance sheet layout is invalid", e)
        })?;

        info!("Read {} allowance records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_exported_grid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("allowance.csv");
        std::fs::write(&path, "Week,Ava,Ben\n2025-06-02,7,5\n2025-06-09,\"$1,007.00\"\n").unwrap();

        let records = CsvAllowanceSource::new(&path).get_allowance_data().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].amount_earned, dec!(1007.00));
    }

    #[tokio::test]
    async fn test_missing_export_is_source_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = CsvAllowanceSource::new(dir.path().join("absent.csv"));

        let error = source.get_allowance_data().await.unwrap_err();
        assert!(error.message().starts_with("cannot open allowance export"));
    }

    #[tokio::test]
    async fn test_empty_export_has_no_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("allowance.csv");
        std::fs::write(&path, "").unwrap();

        assert!(CsvAllowanceSource::new(&path).get_allowance_data().await.unwrap().is_empty());
    }
}
