//! Alert indicator task.
//!
//! Blinks the LED on an even duty cycle while the alert flag is raised,
//! holds it off otherwise. Runs on its own so blink timing is independent
//! of scroll timing.

use std::time::Duration;

use crate::panel::Indicator;
use crate::state::SharedState;

pub const BLINK_INTERVAL: Duration = Duration::from_millis(1500);

pub async fn run<I: Indicator>(state: SharedState, mut led: I, interval: Duration) {
    loop {
        if state.alert() {
            led.set(true);
            tokio::time::sleep(interval).await;
            led.set(false);
            tokio::time::sleep(interval).await;
        } else {
            led.set(false);
            tokio::time::sleep(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct TestLed {
        on: Arc<AtomicBool>,
        toggles: Arc<AtomicUsize>,
    }

    impl Indicator for TestLed {
        fn set(&mut self, on: bool) {
            if self.on.swap(on, Ordering::SeqCst) != on {
                self.toggles.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn blinks_only_while_alert_is_raised() {
        let state = SharedState::new();
        let led = TestLed::default();
        let handle = tokio::spawn(run(state.clone(), led.clone(), BLINK_INTERVAL));

        // No alert: off, no toggling.
        tokio::time::sleep(BLINK_INTERVAL * 4).await;
        assert!(!led.on.load(Ordering::SeqCst));
        assert_eq!(led.toggles.load(Ordering::SeqCst), 0);

        // Alert raised: the LED starts cycling.
        state.set_message(1, "Max".into());
        tokio::time::sleep(BLINK_INTERVAL * 6).await;
        assert!(led.toggles.load(Ordering::SeqCst) >= 4);

        // Alert dropped: stays off again.
        state.acknowledge();
        tokio::time::sleep(BLINK_INTERVAL * 2).await;
        let settled = led.toggles.load(Ordering::SeqCst);
        tokio::time::sleep(BLINK_INTERVAL * 4).await;
        assert!(!led.on.load(Ordering::SeqCst));
        assert!(led.toggles.load(Ordering::SeqCst) <= settled + 1);

        handle.abort();
    }
}
