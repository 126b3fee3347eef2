use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a notification.
///
/// Status moves along exactly one of two paths:
/// `sent -> received -> approved -> displayed` or
/// `sent -> received -> rejected`. `displayed` and `rejected` are terminal.
/// The store does not police this — the relay scheduler is the only writer
/// that matters, and external PATCHes are restricted to the post-`sent`
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Received,
    Approved,
    Rejected,
    Displayed,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Sent => "sent",
            MessageStatus::Received => "received",
            MessageStatus::Approved => "approved",
            MessageStatus::Rejected => "rejected",
            MessageStatus::Displayed => "displayed",
        }
    }

    /// Values accepted on a status PATCH. `sent` is assigned only by the
    /// store at creation and can never be written back.
    pub fn patchable(&self) -> bool {
        !matches!(self, MessageStatus::Sent)
    }
}

impl FromStr for MessageStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(MessageStatus::Sent),
            "received" => Ok(MessageStatus::Received),
            "approved" => Ok(MessageStatus::Approved),
            "rejected" => Ok(MessageStatus::Rejected),
            "displayed" => Ok(MessageStatus::Displayed),
            _ => Err(InvalidStatus(s.to_string())),
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status value: {}", self.0)
    }
}

impl std::error::Error for InvalidStatus {}

/// A notification as stored and relayed. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for s in ["sent", "received", "approved", "rejected", "displayed"] {
            assert_eq!(s.parse::<MessageStatus>().unwrap().as_str(), s);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("bogus".parse::<MessageStatus>().is_err());
        assert!("Approved".parse::<MessageStatus>().is_err());
    }

    #[test]
    fn sent_is_not_patchable() {
        assert!(!MessageStatus::Sent.patchable());
        assert!(MessageStatus::Received.patchable());
        assert!(MessageStatus::Displayed.patchable());
    }
}
