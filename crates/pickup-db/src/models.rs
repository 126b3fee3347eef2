//! Database row types mapping directly to SQLite rows, kept distinct from
//! the shared API models so the storage layer stays independent.

use chrono::{DateTime, Utc};

use pickup_types::{Message, MessageStatus};

pub struct MessageRow {
    pub id: i64,
    pub content: String,
    pub status: String,
    pub created_at: String,
}

impl MessageRow {
    /// Convert a raw row into the shared API model. Corrupt status or
    /// timestamp values fall back to defaults rather than failing a read.
    pub fn into_message(self) -> Message {
        let status = self.status.parse::<MessageStatus>().unwrap_or_else(|e| {
            tracing::warn!("Corrupt status on message {}: {}", self.id, e);
            MessageStatus::Sent
        });

        // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
        // Parse as naive UTC and convert.
        let created_at = self
            .created_at
            .parse::<DateTime<Utc>>()
            .or_else(|_| {
                chrono::NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%d %H:%M:%S")
                    .map(|ndt| ndt.and_utc())
            })
            .unwrap_or_else(|e| {
                tracing::warn!("Corrupt created_at on message {}: {}", self.id, e);
                DateTime::default()
            });

        Message {
            id: self.id,
            content: self.content,
            status,
            created_at,
        }
    }
}
