//! Recording and reading expenditures.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use rust_decimal::Decimal;
use tracing::info;

use super::error::LedgerError;
use super::models::{ExpenditureRecord, NewExpenditure};
use crate::storage::{ExpenditureStore, StoreUnavailableError};

/// Precision kept for `recorded_at`, matching the table's sort key
const RECORDED_AT_DIGITS: u16 = 6;

#[derive(Clone)]
pub struct ExpenditureService {
    store: Arc<dyn ExpenditureStore>,
}

impl ExpenditureService {
    pub fn new(store: Arc<dyn ExpenditureStore>) -> Self {
        Self { store }
    }

    /// Stamp and append one expenditure.
    ///
    /// Every call appends a new record, so a resubmitted form is stored twice.
    /// The store may be eventually consistent: a read right after this call
    /// is not guaranteed to see the new record.
    pub async fn save_expenditure(&self, expenditure: NewExpenditure) -> Result<ExpenditureRecord, StoreUnavailableError> {
        let record = expenditure.into_record(Utc::now().trunc_subsecs(RECORDED_AT_DIGITS));
        self.store.save_expenditure(&record).await?;

        info!(
            "Recorded expenditure of {} for {} on {}: {}",
            record.amount, record.child_id, record.date, record.description
        );
        Ok(record)
    }

    pub async fn get_expenditures(&self, child_id: &str) -> Result<Vec<ExpenditureRecord>, StoreUnavailableError> {
        self.store.get_expenditures(child_id).await
    }

    pub async fn list_expenditures(&self) -> Result<Vec<ExpenditureRecord>, StoreUnavailableError> {
        self.store.list_expenditures().await
    }

    pub async fn total_spent(&self, child_id: &str) -> Result<Decimal, LedgerError> {
        let expenditures = self.get_expenditures(child_id).await?;
        expenditures
            .iter()
            .try_fold(Decimal::ZERO, |total, e| total.checked_add(e.amount))
            .ok_or_else(|| LedgerError::TotalsOverflow {
                child_id: child_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::UnreachableExpenditureStore;
    use crate::storage::InMemoryExpenditureTable;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn spend(child: &str, amount: Decimal, description: &str) -> NewExpenditure {
        NewExpenditure {
            child_id: child.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            description: description.to_string(),
        }
    }

    fn create_test_service() -> ExpenditureService {
        ExpenditureService::new(Arc::new(InMemoryExpenditureTable::new()))
    }

    #[tokio::test]
    async fn test_saved_record_reads_back_identically() {
        let service = create_test_service();

        let saved = service.save_expenditure(spend("Ava", dec!(5.00), "Comic")).await.unwrap();
        let stored = service.get_expenditures("Ava").await.unwrap();

        assert_eq!(stored, vec![saved]);
    }

    #[tokio::test]
    async fn test_reads_without_writes_are_repeatable() {
        let service = create_test_service();
        service.save_expenditure(spend("Ava", dec!(1.00), "Gum")).await.unwrap();
        service.save_expenditure(spend("Ava", dec!(2.00), "Pencil")).await.unwrap();

        let first = service.get_expenditures("Ava").await.unwrap();
        let second = service.get_expenditures("Ava").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].description, "Gum");
        assert_eq!(first[1].description, "Pencil");
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_stored_twice() {
        let service = create_test_service();
        service.save_expenditure(spend("Ava", dec!(3.00), "Toy")).await.unwrap();
        service.save_expenditure(spend("Ava", dec!(3.00), "Toy")).await.unwrap();

        assert_eq!(service.get_expenditures("Ava").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_negative_amount_is_stored() {
        // Current behavior: nothing rejects a negative spend.
        let service = create_test_service();
        service.save_expenditure(spend("Ava", dec!(-4.00), "Returned toy")).await.unwrap();

        assert_eq!(service.total_spent("Ava").await.unwrap(), dec!(-4.00));
    }

    #[tokio::test]
    async fn test_total_spent_sums_one_child() {
        let service = create_test_service();
        service.save_expenditure(spend("Ava", dec!(1.25), "Gum")).await.unwrap();
        service.save_expenditure(spend("Ben", dec!(9.00), "Lego")).await.unwrap();
        service.save_expenditure(spend("Ava", dec!(2.50), "Card")).await.unwrap();

        assert_eq!(service.total_spent("Ava").await.unwrap(), dec!(3.75));
        assert_eq!(service.total_spent("Cleo").await.unwrap(), Decimal::ZERO);
        assert_eq!(service.list_expenditures().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let service = ExpenditureService::new(Arc::new(UnreachableExpenditureStore));

        assert!(service.save_expenditure(spend("Ava", dec!(1), "Gum")).await.is_err());
        assert!(service.get_expenditures("Ava").await.is_err());
    }

    #[tokio::test]
    async fn test_total_spent_out_of_range_is_an_error() {
        let service = create_test_service();
        service.save_expenditure(spend("Ava", Decimal::MAX, "Everything")).await.unwrap();
        service.save_expenditure(spend("Ava", Decimal::MAX, "Everything again")).await.unwrap();

        assert!(matches!(
            service.total_spent("Ava").await,
            Err(LedgerError::TotalsOverflow { .. })
        ));
    }
}
