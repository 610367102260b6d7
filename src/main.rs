mod app;
mod boundary;
mod color;
mod config;
mod data;
mod present;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

use app::WineAtlasApp;
use config::AppConfig;
use data::loader;
use data::model::Dataset;
use state::AppState;

/// Explore a list of French wines by type, region and grape variety.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Wine list to open (.csv, .json or .parquet); the built-in sample is used otherwise
    data: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };
    log::debug!("Configuration: {config:?}");

    let (dataset, load_error) = match &cli.data {
        Some(path) => match loader::load_file(path) {
            Ok(dataset) => (dataset, None),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                (Dataset::builtin(), Some(format!("Error: {e:#}")))
            }
        },
        None => (Dataset::builtin(), None),
    };
    log::info!("Starting with {} wines from {}", dataset.len(), dataset.source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([640.0, 420.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let mut state = AppState::new(config, dataset);
    state.status_message = load_error;

    eframe::run_native(
        "Wine Atlas – Vini di Francia",
        options,
        Box::new(|_cc| Ok(Box::new(WineAtlasApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
