pub mod control;
pub mod error;
pub mod messages;

use std::sync::Arc;

use pickup_db::Database;
use pickup_relay::{DeviceClient, RelayScheduler};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Arc<Database>,
    pub scheduler: Arc<RelayScheduler>,
    pub device: DeviceClient,
}
