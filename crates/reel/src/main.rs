use anyhow::Context;
use reel::config;
use reel::gui::app::AppModel;
use reel::gui::deck::Deck;
use reel::gui::now_ms;
use reel::sys::runtime;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_default();
    let deck = Deck::new(&config, now_ms()).context("Invalid carousel layout")?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx).context("Failed to start background services")?;

    let app = RelmApp::new("org.reel.reel");

    app.run::<AppModel>((deck, config.theme, rx));
    Ok(())
}
