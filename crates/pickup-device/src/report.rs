//! Status reporting back to the server.
//!
//! All calls are best-effort: a transport failure is logged and swallowed
//! so the input monitor never stalls on a dead backend.

use tracing::{info, warn};

use pickup_types::MessageStatus;

#[allow(async_fn_in_trait)]
pub trait Reporter: Send + Sync {
    /// PATCH the message's status on the server.
    async fn report_status(&self, message_id: i64, status: MessageStatus);

    /// Ask the server to blank the public display.
    async fn request_clear(&self);
}

/// reqwest-backed reporter talking to the pickup server.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Reporter for BackendClient {
    async fn report_status(&self, message_id: i64, status: MessageStatus) {
        let url = format!("{}/api/messages/{}", self.base_url, message_id);
        let body = serde_json::json!({ "status": status.as_str() });

        match self.http.patch(&url).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Reported message {} as {}", message_id, status);
            }
            Ok(resp) => {
                warn!(
                    "Server refused status {} for message {}: {}",
                    status,
                    message_id,
                    resp.status()
                );
            }
            Err(e) => {
                warn!("Failed to report status for message {}: {}", message_id, e);
            }
        }
    }

    async fn request_clear(&self) {
        let url = format!("{}/api/clear", self.base_url);

        match self.http.post(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Requested display clear");
            }
            Ok(resp) => {
                warn!("Server refused clear request: {}", resp.status());
            }
            Err(e) => {
                warn!("Failed to request clear: {}", e);
            }
        }
    }
}
