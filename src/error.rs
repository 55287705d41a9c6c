use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Error type shared by every notes endpoint
///
/// Client errors carry the message returned to the caller. Store failures keep
/// their full context chain for the log but are reported to the client only as
/// a generic internal error.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request input
    InvalidInput(String),
    /// Path or body identifier that is not a UUID
    InvalidId(String),
    /// No note matched the request
    NotFound(&'static str),
    /// Store or other unexpected failure
    Internal(anyhow::Error),
}

impl ApiError {
    pub const INTERNAL_MESSAGE: &'static str = "Internal server error";
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidId(id) => (StatusCode::BAD_REQUEST, format!("Invalid note ID: {}", id)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}
