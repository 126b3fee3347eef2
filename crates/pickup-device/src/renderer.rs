//! Display renderer task.
//!
//! Rasterizes the shared text at native glyph size, scales it up to the
//! panel proportions and either draws it statically or scrolls it when it
//! is wider than the visible area. A render pass restarts from scratch the
//! moment the dirty flag is set. When nothing should be visible the panel
//! is powered down.
//!
//! A panel or raster fault ends this task — and only this task. The caller
//! logs it; input, indicator and the inbound endpoint keep running.

use std::time::Duration;

use tracing::{debug, error, info};

use crate::font::GLYPH_SIZE;
use crate::panel::{Panel, RenderError};
use crate::raster;
use crate::state::SharedState;

pub use crate::raster::Frame;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Horizontal scale factor applied to the native glyph raster.
    pub width_factor: f32,
    /// Vertical scale factor (8 px glyphs fill a 64 px panel at 8.0).
    pub height_factor: f32,
    /// Text wider than `panel width - margin` scrolls instead of sitting.
    pub scroll_margin: usize,
    /// Horizontal pixels advanced per scroll step.
    pub scroll_step: usize,
    /// Cadence between scroll steps.
    pub scroll_tick: Duration,
    /// Pause at the start of every scroll pass.
    pub scroll_start_pause: Duration,
    /// Pixels of scaled raster left hanging past the visible area before a
    /// scroll pass wraps around.
    pub scroll_tail: usize,
    /// Redraw interval for static (non-scrolling) text.
    pub static_nap: Duration,
    /// How often the powered-down renderer checks for new text.
    pub idle_poll: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width_factor: 2.25,
            height_factor: 8.0,
            scroll_margin: 10,
            scroll_step: 2,
            scroll_tick: Duration::from_millis(10),
            scroll_start_pause: Duration::from_millis(800),
            scroll_tail: 95,
            static_nap: Duration::from_secs(1),
            idle_poll: Duration::from_secs(1),
        }
    }
}

pub async fn run<P: Panel>(
    state: SharedState,
    mut panel: P,
    config: RenderConfig,
) -> Result<(), RenderError> {
    info!("Renderer task started");

    loop {
        let (text, visible) = state.begin_render_pass();

        let result = if visible {
            show_pass(&state, &mut panel, &config, &text).await
        } else {
            idle_pass(&state, &mut panel, &config).await
        };

        if let Err(e) = result {
            error!("Fatal display fault: {}", e);
            let _ = panel.power_off();
            return Err(e);
        }
    }
}

/// Draw `text` until the dirty flag interrupts the pass.
async fn show_pass<P: Panel>(
    state: &SharedState,
    panel: &mut P,
    config: &RenderConfig,
    text: &str,
) -> Result<(), RenderError> {
    panel.power_on()?;

    let source = raster::rasterize(&raster::pad_text(text));
    let dest_width = (source.width() as f32 * config.width_factor) as usize;
    let dest_height = (source.height() as f32 * config.height_factor) as usize;
    let scaled = raster::scale(&source, dest_width, dest_height)?;

    // Width of the actual content at panel scale, padding excluded.
    let content_width =
        (text.chars().count() * GLYPH_SIZE) as f32 * config.width_factor;
    let scrolling = content_width > (panel.width() - config.scroll_margin) as f32;
    debug!(
        "Render pass: {:?}, {}x{}, scrolling={}",
        text, dest_width, dest_height, scrolling
    );

    while !state.is_dirty() {
        if scrolling {
            scroll_pass(state, panel, config, &scaled).await?;
        } else {
            panel.draw(&scaled, 0)?;
            tokio::time::sleep(config.static_nap).await;
        }
    }
    Ok(())
}

/// One full scroll of the scaled raster across the panel.
async fn scroll_pass<P: Panel>(
    state: &SharedState,
    panel: &mut P,
    config: &RenderConfig,
    scaled: &Frame,
) -> Result<(), RenderError> {
    let end = scaled.width().saturating_sub(config.scroll_tail).max(1);

    for x_offset in (0..end).step_by(config.scroll_step.max(1)) {
        if state.is_dirty() {
            return Ok(());
        }
        panel.draw(scaled, -(x_offset as i32))?;
        if x_offset == 0 {
            tokio::time::sleep(config.scroll_start_pause).await;
        }
        tokio::time::sleep(config.scroll_tick).await;
    }
    Ok(())
}

/// Blank and power down, then wait for something to show.
async fn idle_pass<P: Panel>(
    state: &SharedState,
    panel: &mut P,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    panel.draw(&Frame::new(panel.width(), panel.height()), 0)?;
    panel.power_off()?;

    while !state.is_dirty() {
        tokio::time::sleep(config.idle_poll).await;
    }
    Ok(())
}
