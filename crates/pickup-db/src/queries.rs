use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

use pickup_types::MessageStatus;

use crate::Database;
use crate::models::MessageRow;

impl Database {
    /// Insert a new message with status `sent` and return the stored row.
    pub fn insert_message(&self, content: &str) -> Result<MessageRow> {
        self.with_conn(|conn| {
            conn.execute("INSERT INTO messages (content) VALUES (?1)", [content])?;
            let id = conn.last_insert_rowid();
            query_message(conn, id)?
                .ok_or_else(|| anyhow::anyhow!("Inserted message {} not found", id))
        })
    }

    /// Most recent messages, newest first.
    pub fn list_recent(&self, limit: u32) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, content, status, created_at FROM messages
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?1",
            )?;
            let rows = stmt
                .query_map([limit], row_to_message)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_message(&self, id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| query_message(conn, id))
    }

    /// Write a status value. Returns false when the row does not exist.
    ///
    /// No transition checking happens here: the scheduler is the sole
    /// enforcement point for the status lifecycle.
    pub fn update_status(&self, id: i64, status: MessageStatus) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE messages SET status = ?1 WHERE id = ?2",
                rusqlite::params![status.as_str(), id],
            )?;
            Ok(changed > 0)
        })
    }
}

fn query_message(conn: &Connection, id: i64) -> Result<Option<MessageRow>> {
    let row = conn
        .query_row(
            "SELECT id, content, status, created_at FROM messages WHERE id = ?1",
            [id],
            row_to_message,
        )
        .optional()?;
    Ok(row)
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        content: row.get(1)?,
        status: row.get(2)?,
        created_at: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_assigns_id_and_sent_status() {
        let db = Database::open_in_memory().unwrap();
        let row = db.insert_message("Max").unwrap();
        assert!(row.id > 0);
        assert_eq!(row.content, "Max");
        assert_eq!(row.status, "sent");
    }

    #[test]
    fn list_recent_is_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let a = db.insert_message("first").unwrap();
        let b = db.insert_message("second").unwrap();
        let c = db.insert_message("third").unwrap();

        let rows = db.list_recent(2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, c.id);
        assert_eq!(rows[1].id, b.id);

        let all = db.list_recent(10).unwrap();
        assert_eq!(all.last().unwrap().id, a.id);
    }

    #[test]
    fn update_status_reports_missing_rows() {
        let db = Database::open_in_memory().unwrap();
        let row = db.insert_message("Max").unwrap();

        assert!(db.update_status(row.id, MessageStatus::Received).unwrap());
        let stored = db.get_message(row.id).unwrap().unwrap();
        assert_eq!(stored.status, "received");

        assert!(!db.update_status(row.id + 100, MessageStatus::Approved).unwrap());
    }

    #[test]
    fn store_does_not_enforce_transitions() {
        // A direct write can move a message backward. The scheduler is the
        // enforcement point, not the store.
        let db = Database::open_in_memory().unwrap();
        let row = db.insert_message("Max").unwrap();
        db.update_status(row.id, MessageStatus::Displayed).unwrap();
        assert!(db.update_status(row.id, MessageStatus::Received).unwrap());
    }
}
