mod app;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::DepremApp;
use clap::Parser;
use deprem_dash::config::Settings;
use deprem_dash::dashboard::Dashboard;
use deprem_dash::{data, web};
use eframe::egui;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Settings::parse()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(settings: Settings) -> anyhow::Result<()> {
    let table = data::load_cleaned(&settings.data)
        .with_context(|| format!("loading {}", settings.data.display()))?;
    let dashboard = Arc::new(Dashboard::new(Arc::new(table), settings.top));

    if !settings.window {
        let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
        return runtime.block_on(web::serve(dashboard, settings.bind));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Earthquake city statistics",
        options,
        Box::new(|_cc| Ok(Box::new(DepremApp::new(dashboard)))),
    )
    .map_err(|e| anyhow::anyhow!("window closed with error: {e}"))
}
