use std::collections::BTreeMap;

use chrono::Utc;

use crate::domain::models::Balance;
use shared::{ChildBalance, DashboardResponse};

pub struct BalanceMapper;

impl BalanceMapper {
    pub fn to_dto(domain: Balance) -> ChildBalance {
        ChildBalance {
            child: domain.child_id,
            total_earned: domain.total_earned,
            total_spent: domain.total_spent,
            balance: domain.balance,
        }
    }

    /// Balances come out ordered by child name, following the map's order
    pub fn to_dashboard_response(balances: BTreeMap<String, Balance>) -> DashboardResponse {
        DashboardResponse {
            balances: balances.into_values().map(Self::to_dto).collect(),
            generated_at: Utc::now(),
        }
    }
}
