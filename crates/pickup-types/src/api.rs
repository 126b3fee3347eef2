use serde::{Deserialize, Serialize};

// -- Server API --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMessageRequest {
    pub content: String,
}

/// Status arrives as a raw string so the handler can reject unknown values
/// with a 400 instead of a serde deserialization error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self { status: status.into() }
    }
}

// -- Device API --

/// Payload forwarded from the server to the device on message creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeviceMessage {
    pub content: String,
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeviceLiveResponse {
    pub status: String,
    pub device: String,
}
