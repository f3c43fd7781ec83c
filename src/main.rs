//! Vulnboard - Vulnerability dashboard charts & report upload guard
//!
//! Shows vulnerability counts by type and by risk level, and only lets `.txt`
//! scan reports through the upload control. `--export` renders the charts to
//! image files without opening a window.

mod charts;
mod config;
mod data;
mod gui;
mod logging;
mod page;
mod upload;

use anyhow::{Context, Result};
use charts::{render_charts, ImageFormat, PlottersClient};
use clap::Parser;
use config::DashboardConfig;
use data::DataLoader;
use eframe::egui;
use gui::DashboardApp;
use page::Page;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vulnboard", version, about)]
struct Cli {
    /// Dashboard data file (JSON with "vulnerabilidades" and "riesgos" counts)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render both charts into this directory and exit
    #[arg(long, requires = "data")]
    export: Option<PathBuf>,

    /// Image format for --export
    #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
    format: ImageFormat,

    /// Overrides the configured log level
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let level = logging::parse_level(cli.log_level.as_deref().unwrap_or(&config.log_level));
    logging::initialize(level, config.log_file.as_deref());

    if let (Some(out_dir), Some(data_path)) = (&cli.export, &cli.data) {
        return export(&config, data_path, out_dir, cli.format);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Vulnboard"),
        ..Default::default()
    };

    let data_path = cli.data.clone();
    eframe::run_native(
        "Vulnboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, data_path.as_deref())))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {}", e))
}

/// Headless rendering of both charts.
fn export(
    config: &DashboardConfig,
    data_path: &std::path::Path,
    out_dir: &std::path::Path,
    format: ImageFormat,
) -> Result<()> {
    let mut loader = DataLoader::new();
    let data = loader
        .load_json(data_path)
        .with_context(|| format!("loading data {}", data_path.display()))?;

    let page = Page::dashboard(config, Vec::new());
    let mut client = PlottersClient::new(out_dir, format);
    render_charts(
        &config.charts,
        &page,
        &mut client,
        &data.vulnerabilities,
        &data.risks,
    )
    .context("rendering charts")?;

    for path in client.written() {
        println!("{}", path.display());
    }
    Ok(())
}
