pub mod forward;
pub mod osc;
pub mod scheduler;
pub mod sink;

pub use forward::{DeviceClient, Reachability};
pub use scheduler::{RelayScheduler, StatusUpdateError};
pub use sink::{DisplaySink, OscSink};
