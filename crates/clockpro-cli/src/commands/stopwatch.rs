use clockpro_core::Config;

use crate::session::{self, Foreground};

pub async fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut hub = super::open_hub(&config, json)?;
    hub.stopwatch_mut().start();
    session::drive(hub, Foreground::Stopwatch, json).await
}
