//! Environment-supplied configuration.
//!
//! Every setting has a default except the sheet credentials. Defaults are
//! logged as they are applied, and values that cannot be parsed stop startup.

use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use crate::storage::sheets::{DEFAULT_API_BASE, DEFAULT_RANGE, DEFAULT_TIMEOUT};
use crate::storage::{SheetsConfig, SheetsCredential};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_TABLE_NAME: &str = "expenditures";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Where allowance data is read from
#[derive(Debug, Clone)]
pub enum AllowanceSourceConfig {
    Sheets(SheetsConfig),
    Csv { path: PathBuf },
    /// No source configured; every child has earned nothing
    Unconfigured,
}

/// Where expenditures are appended to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenditureTableConfig {
    Csv { table_name: String, path: PathBuf },
    InMemory { table_name: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub allowance_source: AllowanceSourceConfig,
    pub expenditure_table: ExpenditureTableConfig,
    pub authorized_emails: Vec<String>,
    pub emails_case_sensitive: bool,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load from process environment variables
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = try_load(&var, "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let allowance_source = load_allowance_source(&var)?;

        let table_name = var("EXPENDITURE_TABLE")
            .or_else(|| var("DYNAMODB_TABLE"))
            .unwrap_or_else(|| {
                info!("EXPENDITURE_TABLE not set, using default: {DEFAULT_TABLE_NAME}");
                DEFAULT_TABLE_NAME.to_string()
            });
        let expenditure_table = match var("DATA_DIR") {
            Some(dir) => ExpenditureTableConfig::Csv {
                path: PathBuf::from(dir).join(format!("{table_name}.csv")),
                table_name,
            },
            None => {
                warn!("DATA_DIR not set; expenditures are kept in memory and lost on restart");
                ExpenditureTableConfig::InMemory { table_name }
            }
        };

        let authorized_emails = split_list(var("AUTHORIZED_EMAILS").as_deref());
        if authorized_emails.is_empty() {
            warn!("AUTHORIZED_EMAILS not set; expenditure submissions will be rejected");
        }
        let emails_case_sensitive = try_load(&var, "AUTHORIZED_EMAILS_CASE_SENSITIVE", "false")?;
        let cors_origins = split_list(var("CORS_ORIGINS").as_deref());

        Ok(Self {
            bind_addr,
            allowance_source,
            expenditure_table,
            authorized_emails,
            emails_case_sensitive,
            cors_origins,
        })
    }
}

/// Log filter directive from `LOG_LEVEL`, read before tracing is set up
pub fn log_directive() -> String {
    env::var("LOG_LEVEL")
        .ok()
        .map(|level| level.trim().to_lowercase())
        .filter(|level| !level.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn load_allowance_source<V>(var: &V) -> Result<AllowanceSourceConfig>
where
    V: Fn(&str) -> Option<String>,
{
    if let Some(spreadsheet_id) = var("GOOGLE_SHEET_ID") {
        let blob = var("GOOGLE_CREDENTIALS").unwrap_or_default();
        let credential = SheetsCredential::from_blob(&blob).map_err(|e| anyhow!("GOOGLE_CREDENTIALS: {e}"))?;
        if credential == SheetsCredential::Anonymous {
            warn!("GOOGLE_CREDENTIALS not set; only publicly shared sheets can be read");
        }

        let range = var("SHEET_RANGE").or_else(|| var("RANGE_NAME")).unwrap_or_else(|| {
            info!("SHEET_RANGE not set, using default: {DEFAULT_RANGE}");
            DEFAULT_RANGE.to_string()
        });
        let timeout_secs: u64 = try_load(var, "SHEETS_TIMEOUT_SECS", &DEFAULT_TIMEOUT.as_secs().to_string())?;

        return Ok(AllowanceSourceConfig::Sheets(SheetsConfig {
            spreadsheet_id,
            range,
            credential,
            api_base: var("SHEETS_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        }));
    }

    if let Some(path) = var("ALLOWANCE_CSV_PATH") {
        return Ok(AllowanceSourceConfig::Csv { path: path.into() });
    }

    warn!("Neither GOOGLE_SHEET_ID nor ALLOWANCE_CSV_PATH is set; no allowance data will be read");
    Ok(AllowanceSourceConfig::Unconfigured)
}

fn try_load<T, V>(var: &V, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
    V: Fn(&str) -> Option<String>,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value '{raw}': {e}");
        anyhow!("{e}").context(format!("invalid {key} value '{raw}'"))
    })
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
