//! Inbound endpoint: the server pushes new messages here.
//!
//! The handler only sanitizes and flips state flags — rendering happens in
//! the renderer task, so the calling transport is never blocked.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use pickup_types::api::{DeviceLiveResponse, DeviceMessage};

use crate::sanitize;
use crate::state::SharedState;

pub const DEVICE_NAME: &str = "pickup approval box";

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", post(receive_message))
        .route("/live", get(live))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn receive_message(
    State(state): State<SharedState>,
    payload: Result<Json<DeviceMessage>, JsonRejection>,
) -> impl IntoResponse {
    let Json(msg) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            warn!("Rejected inbound message: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": rejection.body_text() })),
            );
        }
    };

    let text = sanitize::sanitize(&msg.content);
    if text.is_empty() {
        warn!("Message {} sanitized to nothing, blanking display", msg.id);
        state.hide();
    } else {
        info!("Message {} received: {:?}", msg.id, text);
        state.set_message(msg.id, text);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "message received" })),
    )
}

async fn live() -> Json<DeviceLiveResponse> {
    Json(DeviceLiveResponse {
        status: "running".into(),
        device: DEVICE_NAME.into(),
    })
}
