//! Device controller for the pickup approval box.
//!
//! Four cooperative tasks share one small mutex-guarded state object:
//! the display renderer, the button input monitor, the alert indicator and
//! the inbound HTTP endpoint (the status reporter rides along with the
//! input monitor). Hardware sits behind traits so everything here runs and
//! tests on a host; the binary wires the simulated backend.

pub mod font;
pub mod http;
pub mod indicator;
pub mod input;
pub mod panel;
pub mod raster;
pub mod renderer;
pub mod report;
pub mod sanitize;
pub mod sim;
pub mod state;

pub use state::SharedState;
