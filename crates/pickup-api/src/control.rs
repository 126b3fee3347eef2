use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use pickup_relay::Reachability;
use pickup_types::api::StatusResponse;

use crate::AppState;
use crate::error::ApiError;

/// Manual clear: blank the wall immediately and finish whatever message was
/// occupying it. Safe to call with nothing showing.
pub async fn clear_display(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.scheduler.clear().await?;
    Ok(Json(StatusResponse::new("display cleared")))
}

/// Device liveness, relayed as a tri-state for the intake UI.
pub async fn device_live(State(state): State<AppState>) -> impl IntoResponse {
    match state.device.probe().await {
        Reachability::Ok => (StatusCode::OK, Json(StatusResponse::new("ok"))),
        Reachability::Error => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(StatusResponse::new("service unavailable")),
        ),
        Reachability::Unreachable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(StatusResponse::new("unreachable")),
        ),
    }
}
