//! # REST API for Balances
//!
//! Balances are recomputed from both sources on every request.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::info;

use super::error::ApiError;
use super::mappers::BalanceMapper;
use super::pages;
use crate::AppState;
use shared::DashboardResponse;

/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, ApiError> {
    info!("GET /api/dashboard");

    let balances = state.balance_service.calculate_totals().await?;
    Ok(Json(BalanceMapper::to_dashboard_response(balances)))
}

/// GET /dashboard
pub async fn dashboard_page(State(state): State<AppState>) -> Response {
    info!("GET /dashboard");

    match state.balance_service.calculate_totals().await {
        Ok(balances) => Html(pages::dashboard(balances.values())).into_response(),
        Err(e) => {
            let error = ApiError::from(e);
            error.log();
            (error.status(), Html(pages::error_page(&error))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AllowanceRecord;
    use crate::domain::AuthService;
    use crate::storage::test_utils::{UnreachableAllowanceSource, UnreachableExpenditureStore};
    use crate::storage::{InMemoryExpenditureTable, StaticAllowanceSource};
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn setup_test_state() -> AppState {
        let week = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        let allowances = vec![
            AllowanceRecord::new("child1", week(2), dec!(7)),
            AllowanceRecord::new("child1", week(9), dec!(7)),
        ];
        AppState::new(
            Arc::new(StaticAllowanceSource::new(allowances)),
            Arc::new(InMemoryExpenditureTable::new()),
            AuthService::new(["parent@example.com"], false),
        )
    }

    #[tokio::test]
    async fn test_get_dashboard_handler() {
        let state = setup_test_state();

        let Json(response) = get_dashboard(State(state)).await.unwrap();

        assert_eq!(response.balances.len(), 1);
        assert_eq!(response.balances[0].child, "child1");
        assert_eq!(response.balances[0].balance, dec!(14));
    }

    #[tokio::test]
    async fn test_dashboard_page_renders() {
        let response = dashboard_page(State(setup_test_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_source_failure_is_service_unavailable() {
        let state = AppState::new(
            Arc::new(UnreachableAllowanceSource),
            Arc::new(InMemoryExpenditureTable::new()),
            AuthService::new(["parent@example.com"], false),
        );

        let response = get_dashboard(State(state.clone())).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let page = dashboard_page(State(state)).await;
        assert_eq!(page.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_store_failure_is_service_unavailable() {
        let state = AppState::new(
            Arc::new(StaticAllowanceSource::default()),
            Arc::new(UnreachableExpenditureStore),
            AuthService::new(["parent@example.com"], false),
        );

        let response = get_dashboard(State(state.clone())).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let page = dashboard_page(State(state)).await;
        assert_eq!(page.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
