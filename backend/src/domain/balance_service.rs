//! Balance calculation for the allowance ledger.
//!
//! Balances are never stored. Every call re-reads both sources and sums
//! them, so a balance is exactly as fresh as the data behind it.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::error::LedgerError;
use super::models::{AllowanceRecord, Balance, ExpenditureRecord};
use crate::storage::{AllowanceSource, ExpenditureStore};

/// Service responsible for combining allowances and expenditures into balances
#[derive(Clone)]
pub struct BalanceService {
    allowance_source: Arc<dyn AllowanceSource>,
    expenditure_store: Arc<dyn ExpenditureStore>,
}

impl BalanceService {
    pub fn new(allowance_source: Arc<dyn AllowanceSource>, expenditure_store: Arc<dyn ExpenditureStore>) -> Self {
        Self {
            allowance_source,
            expenditure_store,
        }
    }

    /// Balances for every child known to either source, keyed by child.
    ///
    /// Both sources are read concurrently. If either fails the whole
    /// calculation fails; no partial result is returned.
    pub async fn calculate_totals(&self) -> Result<BTreeMap<String, Balance>, LedgerError> {
        let (allowances, expenditures) = tokio::try_join!(
            async { self.allowance_source.get_allowance_data().await.map_err(LedgerError::from) },
            async { self.expenditure_store.list_expenditures().await.map_err(LedgerError::from) },
        )?;

        let balances = aggregate_balances(&allowances, &expenditures)?;
        info!(
            "Calculated {} balances from {} allowance records and {} expenditures",
            balances.len(),
            allowances.len(),
            expenditures.len()
        );
        Ok(balances)
    }

    /// Balance for one child; a child unknown to both sources has zeros
    pub async fn balance_for(&self, child_id: &str) -> Result<Balance, LedgerError> {
        let mut balances = self.calculate_totals().await?;
        Ok(balances.remove(child_id).unwrap_or_else(|| Balance::zero(child_id)))
    }
}

/// Sum earned and spent amounts per child.
///
/// Children with expenditures but no allowance rows are included with
/// nothing earned. Balances are not clamped at zero. Sums that leave the
/// `Decimal` range fail with [`LedgerError::TotalsOverflow`].
pub fn aggregate_balances(
    allowances: &[AllowanceRecord],
    expenditures: &[ExpenditureRecord],
) -> Result<BTreeMap<String, Balance>, LedgerError> {
    let mut totals: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();

    for record in allowances {
        let (earned, _) = totals.entry(record.child_id.as_str()).or_default();
        *earned = earned
            .checked_add(record.amount_earned)
            .ok_or_else(|| overflow(&record.child_id))?;
    }
    for record in expenditures {
        let (_, spent) = totals.entry(record.child_id.as_str()).or_default();
        *spent = spent.checked_add(record.amount).ok_or_else(|| overflow(&record.child_id))?;
    }

    totals
        .into_iter()
        .map(|(child_id, (earned, spent))| -> Result<(String, Balance), LedgerError> {
            let balance = Balance::checked(child_id, earned, spent).ok_or_else(|| overflow(child_id))?;
            Ok((child_id.to_string(), balance))
        })
        .collect()
}

fn overflow(child_id: &str) -> LedgerError {
    warn!("Totals for {} overflowed", child_id);
    LedgerError::TotalsOverflow {
        child_id: child_id.to_string(),
    }
}
