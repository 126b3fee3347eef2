//! Forwarding client for the approval device.
//!
//! Delivery is best-effort: a dead device must never block
//! message creation, so failures are logged and reported as plain outcomes,
//! not errors.

use std::time::Duration;

use tracing::{info, warn};

use pickup_types::api::DeviceMessage;

/// Device reachability as seen by the liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    /// Device answered 200.
    Ok,
    /// Device answered, but not with 200.
    Error,
    /// Transport failure — no answer at all.
    Unreachable,
}

#[derive(Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: String,
}

impl DeviceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Push a new message to the device. Returns true when the device
    /// acknowledged with 200 — the caller then marks the message received.
    pub async fn forward(&self, id: i64, content: &str) -> bool {
        let payload = DeviceMessage {
            content: content.to_string(),
            id,
        };

        match self.http.post(&self.base_url).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Message {} forwarded to device", id);
                true
            }
            Ok(resp) => {
                warn!("Device rejected message {}: {}", id, resp.status());
                false
            }
            Err(e) => {
                warn!("Device unreachable forwarding message {}: {}", id, e);
                false
            }
        }
    }

    /// Probe the device's /live endpoint with a short timeout.
    pub async fn probe(&self) -> Reachability {
        let url = format!("{}/live", self.base_url.trim_end_matches('/'));
        let request = self.http.get(&url).timeout(Duration::from_secs(5));

        match request.send().await {
            Ok(resp) if resp.status().is_success() => Reachability::Ok,
            Ok(resp) => {
                warn!("Device live probe answered {}", resp.status());
                Reachability::Error
            }
            Err(e) => {
                warn!("Device live probe failed: {}", e);
                Reachability::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forward_to_dead_endpoint_is_swallowed() {
        // Nothing listens here; the call must come back false, not panic
        // or propagate an error.
        let client = DeviceClient::new("http://127.0.0.1:9/".into());
        assert!(!client.forward(1, "Max").await);
        assert_eq!(client.probe().await, Reachability::Unreachable);
    }
}
