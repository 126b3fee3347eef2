//! Relay scheduler: owner of the single active display timer.
//!
//! An approved message occupies the public display for a fixed window, then
//! the display is blanked and the message is marked `displayed`. A newer
//! approval or a manual clear preempts the running timer: the token is
//! cancelled, the task is awaited to a full stop, and only then does the
//! next show/blank happen. All display-state mutation is serialized through
//! the slot mutex, so two timers can never run side by side.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use pickup_db::Database;
use pickup_types::{Message, MessageStatus};

use crate::sink::DisplaySink;

/// Substring that marks a message as an emergency announcement.
pub const EMERGENCY_MARKER: &str = "Medizinischer Notfall:";

/// Emergency messages go to the wall verbatim; everything else is a pickup
/// announcement and gets the fixed template.
pub fn frame_content(content: &str) -> String {
    if content.contains(EMERGENCY_MARKER) {
        content.to_string()
    } else {
        format!("Die Eltern von {content} bitte zum Check-in kommen")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StatusUpdateError {
    #[error("invalid status value: {0}")]
    Validation(String),
    #[error("message {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

struct ActiveTimer {
    message_id: i64,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct RelayScheduler {
    slot: Mutex<Option<ActiveTimer>>,
    sink: Arc<dyn DisplaySink>,
    db: Arc<Database>,
    window: Duration,
}

impl RelayScheduler {
    pub fn new(sink: Arc<dyn DisplaySink>, db: Arc<Database>, window: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            sink,
            db,
            window,
        }
    }

    /// Message currently occupying the display, if any.
    pub async fn status(&self) -> Option<i64> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .filter(|t| !t.handle.is_finished())
            .map(|t| t.message_id)
    }

    /// Show a freshly approved message and start its display timer,
    /// preempting whatever was on the wall before.
    pub async fn approve(&self, message_id: i64, content: &str) -> anyhow::Result<()> {
        let mut slot = self.slot.lock().await;
        self.preempt(&mut slot).await?;

        let framed = frame_content(content);
        debug!("Showing message {}: {:?}", message_id, framed);
        self.sink.show(&framed, 1.0);

        let cancel = CancellationToken::new();
        let timer_cancel = cancel.clone();
        let sink = self.sink.clone();
        let db = self.db.clone();
        let window = self.window;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = timer_cancel.cancelled() => {
                    debug!("Display timer for message {} preempted", message_id);
                }
                _ = tokio::time::sleep(window) => {
                    sink.blank();
                    if let Err(e) = db.update_status(message_id, MessageStatus::Displayed) {
                        warn!("Failed to mark message {} displayed: {}", message_id, e);
                    } else {
                        info!("Display window elapsed, message {} displayed", message_id);
                    }
                }
            }
        });

        *slot = Some(ActiveTimer {
            message_id,
            cancel,
            handle,
        });
        Ok(())
    }

    /// Manual clear: stop any running timer, mark its target displayed, then
    /// blank the wall. Blanking happens even with no active timer.
    pub async fn clear(&self) -> anyhow::Result<()> {
        let mut slot = self.slot.lock().await;
        self.preempt(&mut slot).await?;
        self.sink.blank();
        Ok(())
    }

    /// Validated status write. `approved` additionally puts the message on
    /// the display. `sent` and unknown values are rejected before any store
    /// access; an unknown id is a not-found, never a fault.
    pub async fn update_status(
        &self,
        message_id: i64,
        new_status: &str,
    ) -> Result<Message, StatusUpdateError> {
        let status: MessageStatus = new_status
            .parse()
            .map_err(|_| StatusUpdateError::Validation(new_status.to_string()))?;
        if !status.patchable() {
            return Err(StatusUpdateError::Validation(new_status.to_string()));
        }

        let row = self
            .db
            .get_message(message_id)?
            .ok_or(StatusUpdateError::NotFound(message_id))?;

        self.db.update_status(message_id, status)?;

        if status == MessageStatus::Approved {
            self.approve(message_id, &row.content).await?;
        }

        let updated = self
            .db
            .get_message(message_id)?
            .ok_or(StatusUpdateError::NotFound(message_id))?;
        Ok(updated.into_message())
    }

    /// Cancel and join the active timer, if one is still running, and mark
    /// its target message displayed. Must be called with the slot held so
    /// the stop-then-start ordering cannot interleave with another caller.
    async fn preempt(&self, slot: &mut Option<ActiveTimer>) -> anyhow::Result<()> {
        let Some(timer) = slot.take() else {
            return Ok(());
        };

        if timer.handle.is_finished() {
            // Timer already expired naturally and did its own bookkeeping.
            let _ = timer.handle.await;
            return Ok(());
        }

        timer.cancel.cancel();
        if let Err(e) = timer.handle.await {
            warn!("Display timer task failed: {}", e);
        }

        self.sink.blank();
        self.db
            .update_status(timer.message_id, MessageStatus::Displayed)?;
        info!("Preempted display of message {}", timer.message_id);
        Ok(())
    }
}
