//! Argos GUI application entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod inspector;
mod settings;
mod ui;
mod util;
mod window;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context as _};
use app::ArgosApplication;
use clap::Parser;
use context::{AppContext, DEFAULT_PROFILE};
use eframe::egui;

/// Browse and inspect scientific array data.
#[derive(Parser, Debug)]
#[command(name = "argos")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data files to open, one window per file
    files: Vec<PathBuf>,

    /// Settings profile
    #[arg(long, default_value = DEFAULT_PROFILE)]
    profile: String,

    /// Debug logging; missing data clears the plot instead of failing
    #[arg(long)]
    debug: bool,

    /// Read the windows of the profile at start-up and save them at exit
    #[arg(long)]
    persist_settings: bool,

    /// Remove the saved settings of the profile before starting
    #[arg(long)]
    reset_settings: bool,

    /// Settings file [default: <config dir>/argos/settings.json]
    #[arg(long, value_name = "PATH")]
    settings_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings_path = if cli.persist_settings {
        let path = cli
            .settings_file
            .or_else(settings::default_settings_path)
            .context("no settings file given and no config directory found")?;
        Some(path)
    } else {
        None
    };

    let context = AppContext::new(cli.profile, cli.debug);
    let mut app = ArgosApplication::new(context, settings_path);
    app.read_view_settings(cli.reset_settings)
        .context("unable to read settings")?;

    for file in &cli.files {
        app.create_main_window(std::slice::from_ref(file))?;
    }
    if app.main_windows().is_empty() {
        app.create_main_window(&[])?;
    }

    log::info!("Starting Argos...");
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Argos", opts, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow!("event loop failed: {e}"))?;
    log::info!("Argos finished");
    Ok(())
}
