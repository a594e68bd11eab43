mod actions;
mod api;
mod app;
mod config;
mod forms;
mod grading;
mod logging;
mod rows;
mod state;
mod sync;
mod types;
mod ui;

use app::App;
use color_eyre::Result;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    logging::init()?;
    tracing::info!(base_url = %config.server.base_url, "starting gradebook-tui");

    let terminal = ratatui::init();
    let app_result = App::new(config).run(terminal).await;
    ratatui::restore();
    app_result
}
