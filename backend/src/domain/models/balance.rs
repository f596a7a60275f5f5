//! Domain model for a child's derived balance.
use rust_decimal::Decimal;

/// Earned minus spent for one child. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub child_id: String,
    pub total_earned: Decimal,
    pub total_spent: Decimal,
    pub balance: Decimal,
}

impl Balance {
    /// Build a balance from its two totals. The result is not clamped, so
    /// overspending yields a negative balance. `None` if the difference does
    /// not fit in a `Decimal`.
    pub fn checked(child_id: impl Into<String>, total_earned: Decimal, total_spent: Decimal) -> Option<Self> {
        Some(Self {
            child_id: child_id.into(),
            total_earned,
            total_spent,
            balance: total_earned.checked_sub(total_spent)?,
        })
    }

    pub fn zero(child_id: impl Into<String>) -> Self {
        Self {
            child_id: child_id.into(),
            total_earned: Decimal::ZERO,
            total_spent: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }
}
