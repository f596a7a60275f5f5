use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/expenditures` and `POST /expenditures`.
///
/// Every field is optional on the wire so that a missing field can be
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenditureRequest {
    /// Name of the child the money was spent by
    pub child: Option<String>,
    /// Amount spent, as a decimal string or JSON number
    pub amount: Option<Decimal>,
    /// What the money was spent on
    pub description: Option<String>,
    /// Day of the purchase (YYYY-MM-DD)
    pub date: Option<String>,
    /// Email the caller claims to be; the `X-User-Email` header wins if both are sent
    #[serde(alias = "user_id")]
    pub email: Option<String>,
}

/// A stored expenditure as returned over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expenditure {
    pub child: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    /// When the service recorded the expenditure (RFC 3339, UTC)
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenditureResponse {
    pub message: String,
    pub expenditure: Expenditure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenditureListResponse {
    pub expenditures: Vec<Expenditure>,
}

/// Earned, spent and remaining money for one child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildBalance {
    pub child: String,
    pub total_earned: Decimal,
    pub total_spent: Decimal,
    /// `total_earned - total_spent`; may be negative
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Balances ordered by child name
    pub balances: Vec<ChildBalance>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// JSON body of every non-2xx API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-friendly kind, e.g. `forbidden` or `source_unavailable`
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
