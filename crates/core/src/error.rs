use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned for every 500; details stay in the server log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Unified API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Text safe to show to the caller.
    pub fn public_message(&self) -> &str {
        match self {
            Self::BadRequest(msg) => msg,
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

/// JSON error body: `{ "error": "…" }`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(e: &ApiError) -> Self {
        Self {
            error: e.public_message().to_string(),
        }
    }
}
