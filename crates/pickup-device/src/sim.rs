//! Simulated hardware backend.
//!
//! Stands in for the OLED/GPIO wiring so the controller runs on any host:
//! the panel journals draw calls, a button is "pressed" by creating its
//! marker file (which is consumed like a one-shot press), and the LED logs
//! state changes. The journal double-serves as the observation point for
//! renderer tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::panel::{Indicator, InputPin, Panel, PanelError};
use crate::raster::Frame;

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    PowerOn,
    PowerOff,
    Draw { x_offset: i32, width: usize },
}

pub type PanelJournal = Arc<Mutex<Vec<PanelEvent>>>;

pub struct SimPanel {
    width: usize,
    height: usize,
    powered: bool,
    journal: PanelJournal,
}

impl SimPanel {
    pub fn new(width: usize, height: usize) -> (Self, PanelJournal) {
        let journal: PanelJournal = Arc::default();
        (
            Self {
                width,
                height,
                powered: false,
                journal: journal.clone(),
            },
            journal,
        )
    }
}

impl Panel for SimPanel {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn power_on(&mut self) -> Result<(), PanelError> {
        if !self.powered {
            info!("Panel powered on");
            self.powered = true;
        }
        self.journal.lock().unwrap_or_else(|e| e.into_inner()).push(PanelEvent::PowerOn);
        Ok(())
    }

    fn power_off(&mut self) -> Result<(), PanelError> {
        if self.powered {
            info!("Panel powered off");
            self.powered = false;
        }
        self.journal.lock().unwrap_or_else(|e| e.into_inner()).push(PanelEvent::PowerOff);
        Ok(())
    }

    fn draw(&mut self, frame: &Frame, x_offset: i32) -> Result<(), PanelError> {
        debug!("Draw {}x{} at offset {}", frame.width(), frame.height(), x_offset);
        self.journal.lock().unwrap_or_else(|e| e.into_inner()).push(PanelEvent::Draw {
            x_offset,
            width: frame.width(),
        });
        Ok(())
    }
}

/// A button simulated by a marker file: touching the file is one press.
pub struct MarkerFilePin {
    path: PathBuf,
}

impl MarkerFilePin {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InputPin for MarkerFilePin {
    fn is_pressed(&mut self) -> bool {
        if self.path.exists() {
            let _ = std::fs::remove_file(&self.path);
            true
        } else {
            false
        }
    }
}

/// LED that logs transitions.
#[derive(Default)]
pub struct LogIndicator {
    last: Option<bool>,
}

impl Indicator for LogIndicator {
    fn set(&mut self, on: bool) {
        if self.last != Some(on) {
            info!("Alert LED {}", if on { "on" } else { "off" });
            self.last = Some(on);
        }
    }
}
