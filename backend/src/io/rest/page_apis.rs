use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::info;

use super::error::ApiError;
use super::pages;
use crate::AppState;
use shared::HealthResponse;

pub const SERVICE_NAME: &str = "allowance-ledger";

/// GET /
pub async fn landing_page(State(state): State<AppState>) -> Response {
    info!("GET /");

    match state.balance_service.calculate_totals().await {
        Ok(balances) => Html(pages::landing(balances.values())).into_response(),
        Err(e) => {
            let error = ApiError::from(e);
            error.log();
            (error.status(), Html(pages::landing_unavailable(&error))).into_response()
        }
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}
