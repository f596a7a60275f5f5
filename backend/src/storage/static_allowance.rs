use async_trait::async_trait;

use super::error::SourceUnavailableError;
use super::traits::AllowanceSource;
use crate::domain::models::AllowanceRecord;

/// Fixed allowance data held in memory, for local runs without a sheet
#[derive(Debug, Clone, Default)]
pub struct StaticAllowanceSource {
    records: Vec<AllowanceRecord>,
}

impl StaticAllowanceSource {
    pub fn new(records: Vec<AllowanceRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl AllowanceSource for StaticAllowanceSource {
    async fn get_allowance_data(&self) -> Result<Vec<AllowanceRecord>, SourceUnavailableError> {
        Ok(self.records.clone())
    }
}
