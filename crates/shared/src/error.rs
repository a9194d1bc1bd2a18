//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types surfaced at the HTTP boundary.
///
/// Variants that map to the same HTTP status class carry their own machine
/// readable `code` so clients can tell e.g. an unknown split from an unknown
/// participant.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body could not be decoded.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// A required field is missing or blank.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{message}")]
    NotFound {
        /// Machine readable error code.
        code: &'static str,
        /// Human readable message.
        message: String,
    },

    /// Well-formed request rejected by a business rule.
    #[error("{message}")]
    Unprocessable {
        /// Machine readable error code.
        code: &'static str,
        /// Human readable message.
        message: String,
    },
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidJson(_) | Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Unprocessable { .. } => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidJson(_) => "INVALID_JSON",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { code, .. } | Self::Unprocessable { code, .. } => *code,
        }
    }

    /// Returns the message shown to API clients.
    ///
    /// Decoder details are never exposed.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidJson(_) => "request body is not valid JSON".to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::NotFound { message, .. } | Self::Unprocessable { message, .. } => {
                message.clone()
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
