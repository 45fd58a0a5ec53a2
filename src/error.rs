//! Error types for API calls and page state.
//!
//! Two layers:
//! - `ApiError`: what the HTTP boundary produces (transport, non-2xx, auth).
//! - `PageError`: the serializable shape page services hand to the shell.

use serde::Serialize;
use thiserror::Error;

/// Errors produced by the API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    Http { status: u16, message: String },

    /// The backend rejected the bearer token (401).
    #[error("Not authenticated")]
    Unauthorized,

    /// Client-side check failed; no request was issued.
    #[error("{0}")]
    Validation(String),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Returns true if retrying the same action could succeed without
    /// the user changing anything first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Http { .. })
    }

    /// Returns true if the session is missing or expired and the user
    /// must log in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Serializable error representation for the rendering shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageError {
    pub message: String,
    pub kind: ErrorKind,
    pub can_retry: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Network,
    Http,
    Auth,
    Validation,
}

impl From<&ApiError> for PageError {
    fn from(err: &ApiError) -> Self {
        let kind = match err {
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Http { .. } => ErrorKind::Http,
            ApiError::Unauthorized => ErrorKind::Auth,
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::Json(_) | ApiError::Io(_) => ErrorKind::Network,
        };

        PageError {
            message: err.to_string(),
            kind,
            can_retry: err.is_retryable(),
        }
    }
}

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        PageError::from(&err)
    }
}
