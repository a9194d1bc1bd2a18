//! Response envelope and error mapping.
//!
//! Every JSON body has the shape `{"success": bool, "data"?: T, "error"?: {code, message}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use splitter_core::SplitError;
use splitter_shared::AppError;
use tracing::debug;

/// Error body inside the envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine readable error code.
    pub code: &'static str,
    /// Human readable message.
    pub message: String,
}

/// Response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a successful payload.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Builds an error envelope.
    #[must_use]
    pub fn failure(code: &'static str, message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody { code, message }),
        }
    }
}

/// Handler error, rendered as an error envelope.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<SplitError> for ApiError {
    fn from(err: SplitError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        debug!(code = self.0.error_code(), error = %self.0, "Request rejected");

        let body = ApiResponse::failure(self.0.error_code(), self.0.public_message());
        (status, Json(body)).into_response()
    }
}
