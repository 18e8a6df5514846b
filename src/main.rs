mod app;
mod color;
mod config;
mod controls;
mod data;
mod reactive;
mod state;
mod ui;
mod views;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use app::PenguinDashApp;
use config::{DashboardConfig, PAGE_TITLE};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env();
    let path = match config.data_path {
        Some(p) => p,
        None => pick_dataset().context("no dataset selected")?,
    };

    // No recovery path: without data there is nothing to show.
    let dataset = data::loader::load_file(&path)
        .with_context(|| format!("loading {}", path.display()))
        .inspect_err(|e| log::error!("Failed to load dataset: {e:#}"))?;
    let state = AppState::new(dataset, config.page_size);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        PAGE_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(PenguinDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}

fn pick_dataset() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open penguin data")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file()
}
