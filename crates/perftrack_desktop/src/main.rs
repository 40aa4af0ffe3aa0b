//! `perftrack-desktop` entry point.

use anyhow::{anyhow, Context};
use eframe::egui;
use log::info;
use perftrack_core::db::open_db;
use perftrack_core::{init_logging, AppConfig};
use perftrack_desktop::PerfTrackApp;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(None).context("failed to load configuration")?;
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let default_export_path = config
        .db_path
        .with_file_name("performance_export")
        .display()
        .to_string();
    let app = PerfTrackApp::new(conn, default_export_path);

    info!("event=ui_start module=desktop status=ok");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 720.0])
            .with_title("Employee Performance Tracker"),
        ..Default::default()
    };

    eframe::run_native(
        "Employee Performance Tracker",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow!("eframe error: {err}"))?;

    Ok(())
}
