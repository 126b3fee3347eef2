//! Button input monitor.
//!
//! Polls the accept and reject inputs on a short interval. Accept while a
//! message is showing approves it; reject while showing rejects it; reject
//! while idle asks the server to blank the public display. After any press
//! the monitor sits out a cooldown so a held button counts once.

use std::time::Duration;

use tracing::{debug, info};

use pickup_types::MessageStatus;

use crate::panel::InputPin;
use crate::report::Reporter;
use crate::state::SharedState;

#[derive(Debug, Clone)]
pub struct InputConfig {
    pub poll_interval: Duration,
    pub cooldown: Duration,
    /// Grace period after boot before the first poll reacts.
    pub startup_delay: Duration,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(300),
            cooldown: Duration::from_secs(2),
            startup_delay: Duration::from_secs(2),
        }
    }
}

pub async fn run<A, R, C>(
    state: SharedState,
    mut accept: A,
    mut reject: R,
    reporter: C,
    config: InputConfig,
) where
    A: InputPin,
    R: InputPin,
    C: Reporter,
{
    info!("Input monitor started");
    tokio::time::sleep(config.startup_delay).await;

    loop {
        let acted = poll_once(&state, &mut accept, &mut reject, &reporter).await;
        let nap = if acted {
            config.cooldown
        } else {
            config.poll_interval
        };
        tokio::time::sleep(nap).await;
    }
}

/// One poll step. Returns true when a press was handled, which tells the
/// loop to apply the cooldown instead of the normal poll interval.
pub async fn poll_once<A, R, C>(
    state: &SharedState,
    accept: &mut A,
    reject: &mut R,
    reporter: &C,
) -> bool
where
    A: InputPin,
    R: InputPin,
    C: Reporter,
{
    let showing = state.visible();
    let accept_pressed = accept.is_pressed();
    let reject_pressed = reject.is_pressed();

    if accept_pressed && showing {
        decide(state, reporter, MessageStatus::Approved).await;
        true
    } else if reject_pressed && showing {
        decide(state, reporter, MessageStatus::Rejected).await;
        true
    } else if reject_pressed {
        debug!("Reject pressed while idle: requesting display clear");
        reporter.request_clear().await;
        state.clear_alert();
        true
    } else {
        false
    }
}

async fn decide<C: Reporter>(state: &SharedState, reporter: &C, status: MessageStatus) {
    // Drop the message locally first so the display blanks even if the
    // report never makes it out.
    if let Some(id) = state.acknowledge() {
        reporter.report_status(id, status).await;
    } else {
        debug!("Button pressed on a display with no message id (banner?)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct TestPin(Arc<AtomicBool>);

    impl TestPin {
        fn press(&self) {
            self.0.store(true, Ordering::SeqCst);
        }

        fn release(&self) {
            self.0.store(false, Ordering::SeqCst);
        }
    }

    impl InputPin for TestPin {
        fn is_pressed(&mut self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Status(i64, MessageStatus),
        Clear,
    }

    #[derive(Clone, Default)]
    struct TestReporter {
        events: Arc<Mutex<Vec<Event>>>,
    }

    impl Reporter for TestReporter {
        async fn report_status(&self, message_id: i64, status: MessageStatus) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Status(message_id, status));
        }

        async fn request_clear(&self) {
            self.events.lock().unwrap().push(Event::Clear);
        }
    }

    async fn step(
        state: &SharedState,
        accept: &TestPin,
        reject: &TestPin,
        reporter: &TestReporter,
    ) -> bool {
        poll_once(state, &mut accept.clone(), &mut reject.clone(), reporter).await
    }

    #[tokio::test]
    async fn accept_while_showing_approves() {
        let state = SharedState::new();
        state.set_message(7, "Max".into());
        let (accept, reject) = (TestPin::default(), TestPin::default());
        let reporter = TestReporter::default();

        accept.press();
        assert!(step(&state, &accept, &reject, &reporter).await);

        assert_eq!(
            *reporter.events.lock().unwrap(),
            vec![Event::Status(7, MessageStatus::Approved)]
        );
        assert!(!state.visible());
        assert!(!state.alert());
        assert_eq!(state.message_id(), None);
    }

    #[tokio::test]
    async fn reject_while_showing_rejects() {
        let state = SharedState::new();
        state.set_message(9, "Max".into());
        let (accept, reject) = (TestPin::default(), TestPin::default());
        let reporter = TestReporter::default();

        reject.press();
        assert!(step(&state, &accept, &reject, &reporter).await);

        assert_eq!(
            *reporter.events.lock().unwrap(),
            vec![Event::Status(9, MessageStatus::Rejected)]
        );
        assert!(state.is_dirty());
    }

    #[tokio::test]
    async fn reject_while_idle_requests_a_clear() {
        let state = SharedState::new();
        let (accept, reject) = (TestPin::default(), TestPin::default());
        let reporter = TestReporter::default();

        reject.press();
        assert!(step(&state, &accept, &reject, &reporter).await);

        assert_eq!(*reporter.events.lock().unwrap(), vec![Event::Clear]);
    }

    #[tokio::test]
    async fn no_press_means_no_traffic() {
        let state = SharedState::new();
        state.set_message(1, "Max".into());
        let (accept, reject) = (TestPin::default(), TestPin::default());
        let reporter = TestReporter::default();

        assert!(!step(&state, &accept, &reject, &reporter).await);
        assert!(reporter.events.lock().unwrap().is_empty());
        assert!(state.visible());
    }

    #[tokio::test(start_paused = true)]
    async fn held_button_counts_once_per_cooldown() {
        // The run loop naps for the cooldown after a handled press, so a
        // button held across several poll intervals produces one report.
        let state = SharedState::new();
        state.set_message(5, "Max".into());

        let (accept, reject) = (TestPin::default(), TestPin::default());
        let reporter = TestReporter::default();
        accept.press();

        let config = InputConfig::default();
        let handle = tokio::spawn(run(
            state.clone(),
            accept.clone(),
            reject.clone(),
            reporter.clone(),
            config.clone(),
        ));

        // Past startup delay plus one poll, still inside the cooldown.
        tokio::time::sleep(config.startup_delay + Duration::from_millis(500)).await;
        assert_eq!(reporter.events.lock().unwrap().len(), 1);

        accept.release();
        tokio::time::sleep(config.cooldown + config.poll_interval * 2).await;
        assert_eq!(reporter.events.lock().unwrap().len(), 1);

        handle.abort();
    }
}
