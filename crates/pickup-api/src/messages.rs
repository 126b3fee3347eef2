use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::info;

use pickup_types::api::{CreateMessageRequest, PatchStatusRequest};
use pickup_types::{Message, MessageStatus};

use crate::AppState;
use crate::error::ApiError;

/// How many messages the intake UI shows.
const RECENT_LIMIT: u32 = 5;

/// Upper bound on stored content; the device truncates much harder anyway.
const MAX_CONTENT_LEN: usize = 255;

pub async fn list_messages(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    // Run blocking DB reads off the async runtime
    let db = state.db.clone();
    let rows = tokio::task::spawn_blocking(move || db.list_recent(RECENT_LIMIT))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {e}"))??;

    let messages: Vec<Message> = rows.into_iter().map(|r| r.into_message()).collect();
    Ok(Json(messages))
}

/// Create a message and forward it to the approval device. Forwarding is
/// best-effort: a dead device still leaves the message stored as `sent`,
/// and the caller still gets a 201.
pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let content = req.content.trim().to_string();
    if content.is_empty() {
        return Err(ApiError::Validation("content must not be empty".into()));
    }
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(ApiError::Validation(format!(
            "content exceeds {MAX_CONTENT_LEN} characters"
        )));
    }

    let db = state.db.clone();
    let body = content.clone();
    let row = tokio::task::spawn_blocking(move || db.insert_message(&body))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {e}"))??;
    let id = row.id;
    info!("Created message {}", id);

    if state.device.forward(id, &content).await {
        let db = state.db.clone();
        tokio::task::spawn_blocking(move || db.update_status(id, MessageStatus::Received))
            .await
            .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {e}"))??;
    }

    let db = state.db.clone();
    let stored = tokio::task::spawn_blocking(move || db.get_message(id))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {e}"))??
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::CREATED, Json(stored.into_message())))
}

/// Status PATCH from the device (or an operator). Validation happens in the
/// scheduler so approval and display stay in one place.
pub async fn patch_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PatchStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state.scheduler.update_status(id, &req.status).await?;
    Ok(Json(message))
}
