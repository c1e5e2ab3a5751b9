mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use anyhow::Result;
use app::MunicipalFinanceApp;
use clap::Parser;
use config::{Cli, DashboardConfig};
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = DashboardConfig::from_cli(&cli)?;
    log::info!("Using data file {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sveitarfélög – Fjármáladashboard",
        options,
        Box::new(|cc| Ok(Box::new(MunicipalFinanceApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
