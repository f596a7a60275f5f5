//! Translation of domain and storage errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::models::ValidationError;
use crate::domain::LedgerError;
use crate::storage::{SourceUnavailableError, StoreUnavailableError};
use shared::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("caller is not on the authorized email list")]
    Forbidden,
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    SourceUnavailable(#[from] SourceUnavailableError),
    #[error(transparent)]
    StoreUnavailable(#[from] StoreUnavailableError),
    /// A write that the store refused; reported to the submitter as a bad request
    #[error("could not record expenditure: {0}")]
    SaveFailed(StoreUnavailableError),
    #[error("totals for '{child_id}' are out of range")]
    TotalsOverflow { child_id: String },
}

impl From<LedgerError> for ApiError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::SourceUnavailable(e) => Self::SourceUnavailable(e),
            LedgerError::StoreUnavailable(e) => Self::StoreUnavailable(e),
            LedgerError::Validation(e) => Self::Validation(e),
            LedgerError::TotalsOverflow { child_id } => Self::TotalsOverflow { child_id },
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::MalformedBody(_) | Self::Validation(_) | Self::SaveFailed(_) => StatusCode::BAD_REQUEST,
            Self::SourceUnavailable(_) | Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::TotalsOverflow { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
            Self::MalformedBody(_) => "malformed_body",
            Self::Validation(_) => "invalid_expenditure",
            Self::SourceUnavailable(_) => "source_unavailable",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::SaveFailed(_) => "save_failed",
            Self::TotalsOverflow { .. } => "totals_out_of_range",
        }
    }

    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse::new(self.kind(), self.to_string())
    }

    /// Log at a level matching who is at fault: the service or the caller
    pub fn log(&self) {
        if self.status().is_server_error() {
            error!("{} ({})", self, self.kind());
        } else {
            warn!("{} ({})", self, self.kind());
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), Json(self.to_body())).into_response()
    }
}
