//! Renderer task observed through the simulated panel journal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use pickup_device::panel::{Panel, PanelError, RenderError};
use pickup_device::raster::Frame;
use pickup_device::renderer::{self, RenderConfig};
use pickup_device::sim::{PanelEvent, SimPanel};
use pickup_device::state::SharedState;

fn journal_snapshot(journal: &pickup_device::sim::PanelJournal) -> Vec<PanelEvent> {
    journal.lock().unwrap().clone()
}

#[tokio::test(start_paused = true)]
async fn long_text_scrolls_across_the_panel() {
    let state = SharedState::new();
    let (panel, journal) = SimPanel::new(128, 64);
    tokio::spawn(renderer::run(state.clone(), panel, RenderConfig::default()));

    // Starts idle: blanked and powered down.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(journal_snapshot(&journal).contains(&PanelEvent::PowerOff));

    state.set_message(1, "Die Eltern von Max bitte zum Check-in kommen".into());
    tokio::time::sleep(Duration::from_secs(2)).await;

    let events = journal_snapshot(&journal);
    assert!(events.contains(&PanelEvent::PowerOn));

    let offsets: Vec<i32> = events
        .iter()
        .filter_map(|e| match e {
            PanelEvent::Draw { x_offset, .. } => Some(*x_offset),
            _ => None,
        })
        .collect();
    // The pass walks leftward in fixed steps from offset zero.
    assert!(offsets.contains(&0));
    assert!(offsets.contains(&-2));
    assert!(offsets.contains(&-4));
}

#[tokio::test(start_paused = true)]
async fn short_text_sits_still() {
    let state = SharedState::new();
    let (panel, journal) = SimPanel::new(128, 64);
    tokio::spawn(renderer::run(state.clone(), panel, RenderConfig::default()));

    state.show_banner("OK");
    tokio::time::sleep(Duration::from_secs(3)).await;

    let draws: Vec<i32> = journal_snapshot(&journal)
        .iter()
        .filter_map(|e| match e {
            PanelEvent::Draw { x_offset, .. } => Some(*x_offset),
            _ => None,
        })
        .collect();
    assert!(draws.len() >= 2, "static text is redrawn periodically");
    assert!(draws.iter().all(|&x| x == 0));
}

#[tokio::test(start_paused = true)]
async fn hiding_powers_the_panel_down() {
    let state = SharedState::new();
    let (panel, journal) = SimPanel::new(128, 64);
    let task = tokio::spawn(renderer::run(state.clone(), panel, RenderConfig::default()));

    state.set_message(1, "Die Eltern von Max bitte zum Check-in kommen".into());
    tokio::time::sleep(Duration::from_secs(1)).await;
    journal.lock().unwrap().clear();

    state.hide();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let events = journal_snapshot(&journal);
    assert!(events.contains(&PanelEvent::PowerOff));
    assert!(!task.is_finished(), "an idle renderer keeps waiting for text");
}

/// Panel whose draw calls always fail, as a stuck bus would.
struct FaultyPanel {
    powered_off: Arc<AtomicBool>,
}

impl Panel for FaultyPanel {
    fn width(&self) -> usize {
        128
    }

    fn height(&self) -> usize {
        64
    }

    fn power_on(&mut self) -> Result<(), PanelError> {
        Ok(())
    }

    fn power_off(&mut self) -> Result<(), PanelError> {
        self.powered_off.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn draw(&mut self, _frame: &Frame, _x_offset: i32) -> Result<(), PanelError> {
        Err(PanelError("bus stalled".into()))
    }
}

#[tokio::test(start_paused = true)]
async fn panel_fault_powers_off_and_ends_only_the_renderer() {
    let state = SharedState::new();
    state.set_message(3, "Max".into());

    let powered_off = Arc::new(AtomicBool::new(false));
    let panel = FaultyPanel {
        powered_off: powered_off.clone(),
    };
    let task = tokio::spawn(renderer::run(state.clone(), panel, RenderConfig::default()));

    let err = task.await.unwrap().unwrap_err();
    assert!(matches!(err, RenderError::Panel(_)));
    assert!(powered_off.load(Ordering::SeqCst));

    // The shared state is untouched: the message, alert and visibility all
    // survive for the other tasks.
    assert!(state.visible());
    assert!(state.alert());
    assert_eq!(state.message_id(), Some(3));
}
