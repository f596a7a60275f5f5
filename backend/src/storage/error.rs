//! Error kinds raised by the storage layer.
//!
//! Each backend reports exactly one kind: the allowance sources raise
//! [`SourceUnavailableError`] and the expenditure tables raise
//! [`StoreUnavailableError`]. Neither is retried by the caller.

use thiserror::Error;

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The allowance spreadsheet could not be reached or could not be interpreted
#[derive(Debug, Error)]
#[error("allowance source unavailable: {message}")]
pub struct SourceUnavailableError {
    message: String,
    #[source]
    cause: Option<BoxedCause>,
}

impl SourceUnavailableError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: impl Into<BoxedCause>) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The expenditure table could not be read from or appended to
#[derive(Debug, Error)]
#[error("expenditure store unavailable: {message}")]
pub struct StoreUnavailableError {
    message: String,
    #[source]
    cause: Option<BoxedCause>,
}

impl StoreUnavailableError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: impl Into<BoxedCause>) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
