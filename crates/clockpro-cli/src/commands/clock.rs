use clockpro_core::Config;

use crate::session::{self, Foreground};

/// Wall clock. Alarms are checked on every tick by the hub.
pub async fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let hub = super::open_hub(&config, json)?;
    session::drive(hub, Foreground::Clock, json).await
}
