use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by the computations, the API client and configuration.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Invalid amount: `{value}`")]
    InvalidAmount { value: String },
    #[error("Amount total is out of range")]
    AmountOverflow,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Validation(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = StdResult<T, FinanceError>;

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for FinanceError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FinanceError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => FinanceError::Transport(err.to_string()),
        }
    }
}

impl FinanceError {
    /// HTTP status associated with the failure, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FinanceError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
