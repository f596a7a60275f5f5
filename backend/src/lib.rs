//! # Allowance Ledger Backend
//!
//! Tracks what children have earned (from an allowance spreadsheet) and what
//! they have spent (from an append-only expenditure table), and serves the
//! resulting balances over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum handlers, HTML form)
//!     ↓
//! Domain Layer (balance, expenditure and auth services)
//!     ↓
//! Storage Layer (Sheets / CSV allowance sources, expenditure tables)
//! ```
//!
//! Clients are built once in [`initialize_backend`] and handed to the
//! handlers through [`AppState`]; nothing is held in globals.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{AllowanceSourceConfig, Config, ExpenditureTableConfig};
use crate::domain::{AuthService, BalanceService, ExpenditureService};
use crate::storage::{
    AllowanceSource, CsvAllowanceSource, CsvExpenditureTable, ExpenditureStore, InMemoryExpenditureTable,
    SheetsAllowanceSource, StaticAllowanceSource,
};

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub balance_service: BalanceService,
    pub expenditure_service: ExpenditureService,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(
        allowance_source: Arc<dyn AllowanceSource>,
        expenditure_store: Arc<dyn ExpenditureStore>,
        auth_service: AuthService,
    ) -> Self {
        Self {
            balance_service: BalanceService::new(allowance_source, expenditure_store.clone()),
            expenditure_service: ExpenditureService::new(expenditure_store),
            auth_service,
        }
    }
}

/// Build the storage clients and services described by `config`
pub fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up allowance source");
    let allowance_source: Arc<dyn AllowanceSource> = match &config.allowance_source {
        AllowanceSourceConfig::Sheets(sheets) => {
            info!("Using spreadsheet {} range '{}'", sheets.spreadsheet_id, sheets.range);
            Arc::new(SheetsAllowanceSource::new(sheets.clone()).context("failed to set up Sheets client")?)
        }
        AllowanceSourceConfig::Csv { path } => {
            info!("Using allowance export {}", path.display());
            Arc::new(CsvAllowanceSource::new(path.clone()))
        }
        AllowanceSourceConfig::Unconfigured => Arc::new(StaticAllowanceSource::default()),
    };

    info!("Setting up expenditure table");
    let expenditure_store: Arc<dyn ExpenditureStore> = match &config.expenditure_table {
        ExpenditureTableConfig::Csv { table_name, path } => Arc::new(
            CsvExpenditureTable::open(table_name.clone(), path.clone())
                .with_context(|| format!("failed to open expenditure table '{table_name}'"))?,
        ),
        ExpenditureTableConfig::InMemory { table_name } => {
            info!("Using in-memory expenditure table '{}'", table_name);
            Arc::new(InMemoryExpenditureTable::new())
        }
    };

    let auth_service = AuthService::new(&config.authorized_emails, config.emails_case_sensitive);
    info!("Authorized emails configured: {}", auth_service.allowed_count());

    Ok(AppState::new(allowance_source, expenditure_store, auth_service))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .inspect_err(|_| warn!("Ignoring invalid CORS origin '{}'", origin))
                .ok()
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/dashboard", get(io::get_dashboard))
        .route("/expenditures", get(io::list_expenditures).post(io::create_expenditure));

    Router::new()
        .route("/", get(io::landing_page))
        .route("/health", get(io::health_check))
        .route("/dashboard", get(io::dashboard_page))
        .route("/expenditures", post(io::submit_expenditure_form))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(app_state)
}
