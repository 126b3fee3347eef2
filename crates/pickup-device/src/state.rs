//! Shared display state.
//!
//! Every task reads and writes through named methods on one mutex-guarded
//! struct; no raw field is ever shared. The `dirty` flag tells the renderer
//! to abandon whatever it is drawing and start over from the current text
//! and visibility.

use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct DisplayState {
    text: String,
    visible: bool,
    dirty: bool,
    alert: bool,
    message_id: Option<i64>,
}

#[derive(Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<DisplayState>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DisplayState> {
        // A poisoned state mutex means a panicked task; the flags are still
        // consistent single-field writes, so keep going.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// A sanitized message arrived: show it and raise the alert.
    pub fn set_message(&self, id: i64, text: String) {
        let mut s = self.lock();
        s.text = text;
        s.visible = true;
        s.dirty = true;
        s.alert = true;
        s.message_id = Some(id);
    }

    /// Show text without an alert or a message id (startup banner).
    pub fn show_banner(&self, text: &str) {
        let mut s = self.lock();
        s.text = text.to_string();
        s.visible = true;
        s.dirty = true;
    }

    /// Blank the display without touching the alert.
    pub fn hide(&self) {
        let mut s = self.lock();
        s.visible = false;
        s.dirty = true;
    }

    /// End the startup banner, unless a real message took over meanwhile.
    pub fn hide_if_no_message(&self) {
        let mut s = self.lock();
        if s.message_id.is_none() {
            s.visible = false;
            s.dirty = true;
        }
    }

    /// A button decided the current message: drop the alert, blank the
    /// display and hand the message id to the caller for reporting.
    pub fn acknowledge(&self) -> Option<i64> {
        let mut s = self.lock();
        s.alert = false;
        s.visible = false;
        s.dirty = true;
        s.message_id.take()
    }

    /// Reject-while-idle: nothing is showing, just drop alert and id.
    pub fn clear_alert(&self) {
        let mut s = self.lock();
        s.alert = false;
        s.message_id = None;
    }

    /// Consume the dirty flag and return what should be on the display.
    /// Called by the renderer at the top of each render pass.
    pub fn begin_render_pass(&self) -> (String, bool) {
        let mut s = self.lock();
        s.dirty = false;
        (s.text.clone(), s.visible)
    }

    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    pub fn visible(&self) -> bool {
        self.lock().visible
    }

    pub fn alert(&self) -> bool {
        self.lock().alert
    }

    pub fn message_id(&self) -> Option<i64> {
        self.lock().message_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_message_raises_everything() {
        let state = SharedState::new();
        state.set_message(7, "Max".into());
        assert!(state.visible());
        assert!(state.alert());
        assert!(state.is_dirty());
        assert_eq!(state.message_id(), Some(7));
    }

    #[test]
    fn acknowledge_hands_out_the_id_once() {
        let state = SharedState::new();
        state.set_message(7, "Max".into());
        assert_eq!(state.acknowledge(), Some(7));
        assert_eq!(state.acknowledge(), None);
        assert!(!state.visible());
        assert!(!state.alert());
    }

    #[test]
    fn render_pass_consumes_dirty() {
        let state = SharedState::new();
        state.set_message(1, "Max".into());
        let (text, visible) = state.begin_render_pass();
        assert_eq!(text, "Max");
        assert!(visible);
        assert!(!state.is_dirty());
    }

    #[test]
    fn banner_end_respects_a_live_message() {
        let state = SharedState::new();
        state.show_banner("System laeuft");
        state.set_message(3, "Max".into());
        state.hide_if_no_message();
        assert!(state.visible());
    }
}
