//! Control panel error types

use thiserror::Error;

/// Errors that can occur while driving the control panel
///
/// Handlers only ever produce [`PanelError::RequestFailed`]; transport and
/// parse failures both map to it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Logging setup error: {0}")]
    Logging(String),
}

impl From<reqwest::Error> for PanelError {
    fn from(err: reqwest::Error) -> Self {
        PanelError::RequestFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(err: serde_json::Error) -> Self {
        PanelError::RequestFailed(err.to_string())
    }
}

impl From<std::io::Error> for PanelError {
    fn from(err: std::io::Error) -> Self {
        PanelError::Logging(err.to_string())
    }
}

/// Result type for control panel operations
pub type PanelResult<T> = std::result::Result<T, PanelError>;
