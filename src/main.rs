//! Review Dashboard - Negative Review Explorer
//!
//! Loads a spreadsheet of categorized negative reviews and lets the user filter
//! them by category, language and keyword.

mod charts;
mod config;
mod data;
mod gui;
mod report;
mod stats;

use anyhow::{Context, Result};
use config::{CliArgs, DashboardConfig, ReportArgs, DATA_PATH_ENV};
use data::{FilterEngine, FilterQuery, RevealState, ReviewLoader, ReviewTable};
use eframe::egui;
use gui::ReviewDashboardApp;
use report::DashboardReport;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = CliArgs::parse(std::env::args().skip(1))?;
    let config = config::resolve(&cli, std::env::var(DATA_PATH_ENV).ok())?;

    let table = ReviewLoader::load(&config.data_path).with_context(|| {
        format!(
            "Failed to load review data from {}",
            config.data_path.display()
        )
    })?;

    match &cli.report {
        Some(args) => print_report(&table, &config, args),
        None => run_gui(table, config),
    }
}

/// Headless mode: evaluate one query and print the report as JSON.
fn print_report(table: &ReviewTable, config: &DashboardConfig, args: &ReportArgs) -> Result<()> {
    let query = FilterQuery {
        category: args
            .category
            .clone()
            .unwrap_or_else(|| config.default_category.clone()),
        language: args
            .language
            .clone()
            .unwrap_or_else(|| config.default_language.code().to_string()),
        keyword: args.keyword.clone(),
    };
    let reveal = if args.show {
        RevealState::requested()
    } else {
        RevealState::default()
    };

    let result = FilterEngine::evaluate(table, &query, reveal);
    let json = DashboardReport::new(&query, &result).to_json()?;
    println!("{}", json);
    Ok(())
}

fn run_gui(table: ReviewTable, config: DashboardConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Negative Reviews Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Review Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(ReviewDashboardApp::new(cc, table, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start dashboard window: {}", e))
}
