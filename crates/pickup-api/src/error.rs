use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use pickup_relay::StatusUpdateError;

/// API error taxonomy: validation and not-found map to client errors with a
/// structured body; everything else is a bare 500 with the detail logged,
/// never leaked.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("message not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<StatusUpdateError> for ApiError {
    fn from(err: StatusUpdateError) -> Self {
        match err {
            StatusUpdateError::Validation(v) => {
                ApiError::Validation(format!("invalid status value: {v}"))
            }
            StatusUpdateError::NotFound(_) => ApiError::NotFound,
            StatusUpdateError::Store(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(e) => {
                error!("Internal error: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
