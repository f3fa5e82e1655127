mod app;
mod config;
mod domain;
mod engine;
mod infra;
mod logging;
mod platform;
mod ui;
mod usecase;


use anyhow::Result;
use tracing::info;

use crate::app::App;
use crate::config::{default_webview_data_dir, AppConfig};
use crate::logging::init_logging;

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.log_filter);

    let webview_data_dir = default_webview_data_dir()?;
    info!(
        data_dir = %webview_data_dir.display(),
        items_per_page = config.items_per_page,
        "starting dashboard"
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new().with_title(config.window_title.clone()),
                )
                .with_data_directory(webview_data_dir),
        )
        .with_context(config)
        .launch(App);
    Ok(())
}
