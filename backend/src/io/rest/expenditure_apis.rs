//! # REST API for Expenditures
//!
//! JSON and HTML-form endpoints for recording expenditures, and the raw
//! expenditure listing.

use axum::{
    extract::{rejection::FormRejection, rejection::JsonRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::info;

use super::error::ApiError;
use super::mappers::ExpenditureMapper;
use super::pages;
use crate::domain::models::ExpenditureRecord;
use crate::AppState;
use shared::{CreateExpenditureRequest, CreateExpenditureResponse, ExpenditureListResponse};

/// Header carrying the caller's claimed email; takes precedence over the body field
pub const USER_EMAIL_HEADER: &str = "x-user-email";

#[derive(Debug, Deserialize)]
pub struct ExpenditureListQuery {
    pub child: Option<String>,
}

/// The email the caller claims to act as
pub fn claimed_email(headers: &HeaderMap, request: &CreateExpenditureRequest) -> Option<String> {
    headers
        .get(USER_EMAIL_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| request.email.clone())
}

/// Authorize, validate, then store. Nothing reaches the store unless the
/// first two steps pass.
async fn record_expenditure(
    state: &AppState,
    headers: &HeaderMap,
    request: CreateExpenditureRequest,
) -> Result<ExpenditureRecord, ApiError> {
    let email = claimed_email(headers, &request);
    if !state.auth_service.is_authorized(email.as_deref()) {
        return Err(ApiError::Forbidden);
    }

    let expenditure = ExpenditureMapper::to_new_expenditure(&request)?;
    state
        .expenditure_service
        .save_expenditure(expenditure)
        .await
        .map_err(ApiError::SaveFailed)
}

/// POST /api/expenditures
pub async fn create_expenditure(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateExpenditureRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateExpenditureResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::MalformedBody(e.body_text()))?;
    info!("POST /api/expenditures - child: {:?}", request.child);

    let record = record_expenditure(&state, &headers, request).await?;
    Ok((StatusCode::CREATED, Json(ExpenditureMapper::to_create_response(record))))
}

/// POST /expenditures, submitted by the browser form
pub async fn submit_expenditure_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Form<CreateExpenditureRequest>, FormRejection>,
) -> Response {
    let result = match payload {
        Ok(Form(request)) => {
            info!("POST /expenditures - child: {:?}", request.child);
            record_expenditure(&state, &headers, request).await
        }
        Err(e) => Err(ApiError::MalformedBody(e.body_text())),
    };

    match result {
        Ok(record) => (StatusCode::CREATED, Html(pages::confirmation(&record))).into_response(),
        Err(e) => {
            e.log();
            (e.status(), Html(pages::error_page(&e))).into_response()
        }
    }
}

/// GET /api/expenditures, optionally filtered with `?child=`
pub async fn list_expenditures(
    State(state): State<AppState>,
    Query(query): Query<ExpenditureListQuery>,
) -> Result<Json<ExpenditureListResponse>, ApiError> {
    info!("GET /api/expenditures - query: {:?}", query);

    let records = match query.child.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(child) => state.expenditure_service.get_expenditures(child).await?,
        None => state.expenditure_service.list_expenditures().await?,
    };

    Ok(Json(ExpenditureListResponse {
        expenditures: records.into_iter().map(ExpenditureMapper::to_dto).collect(),
    }))
}
