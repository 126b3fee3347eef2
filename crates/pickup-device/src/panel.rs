//! Hardware seams.
//!
//! The renderer, input monitor and indicator are generic over these traits
//! so the task logic runs on a host. A real OLED/GPIO backend implements
//! them against the wire; [`crate::sim`] provides the simulated backend.

use crate::raster::RasterError;

/// A panel fault. Unlike sink or transport failures this is fatal for the
/// rendering task: the display is powered off and the task ends.
#[derive(Debug, thiserror::Error)]
#[error("panel fault: {0}")]
pub struct PanelError(pub String);

/// The physical display.
pub trait Panel: Send {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn power_on(&mut self) -> Result<(), PanelError>;
    fn power_off(&mut self) -> Result<(), PanelError>;

    /// Blit a frame with a horizontal offset (negative shifts the frame
    /// left, which is how scrolling works).
    fn draw(&mut self, frame: &crate::raster::Frame, x_offset: i32) -> Result<(), PanelError>;
}

/// A debounce-free digital input; debouncing is the monitor's job.
pub trait InputPin: Send {
    fn is_pressed(&mut self) -> bool;
}

/// The alert LED.
pub trait Indicator: Send {
    fn set(&mut self, on: bool);
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error(transparent)]
    Panel(#[from] PanelError),
}
