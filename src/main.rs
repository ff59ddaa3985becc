mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::GapFinderApp;
use eframe::egui;
use gapfinder::config::Settings;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config_path = std::env::var_os("GAPFINDER_CONFIG").map(PathBuf::from);
    let (settings, config_error) = match Settings::load_or_default(config_path.as_deref()) {
        Ok(settings) => (settings, None),
        Err(e) => {
            log::error!("Failed to load settings: {e:#}");
            (Settings::default(), Some(format!("Settings ignored: {e:#}")))
        }
    };

    let mut state = AppState::new(settings);
    state.status_message = config_error;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GapFinder – Tauc Band Gap",
        options,
        Box::new(|_cc| Ok(Box::new(GapFinderApp::new(state)))),
    )
}
