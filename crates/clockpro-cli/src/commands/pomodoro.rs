use clockpro_core::Config;

use crate::session::{self, Foreground};

pub async fn run(tag: Option<String>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut hub = super::open_hub(&config, json)?;
    hub.pomodoro_mut().start(tag);
    session::drive(hub, Foreground::Pomodoro, json).await
}
