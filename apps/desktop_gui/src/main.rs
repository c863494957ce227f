//! Desktop client for the vehicle damage assessment service.

mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::app::{PersistedDesktopSettings, SETTINGS_STORAGE_KEY};
use crate::ui::{DamageTriageApp, StartupConfig};

#[derive(Debug, Parser)]
#[command(
    name = "damage-triage",
    about = "Desktop client for the vehicle damage assessment service"
)]
struct Cli {
    /// Base URL of the assessment service.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,
    /// Presentation catalog override file (TOML).
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();

    let catalog = match shared::catalog::load_catalog(cli.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(err) => {
            tracing::warn!("falling back to built-in presentation catalog: {err}");
            shared::catalog::PresentationCatalog::builtin()
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let startup = StartupConfig {
        server_url: cli.server_url,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Vehicle Damage Triage")
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([760.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Vehicle Damage Triage",
        options,
        Box::new(move |cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedDesktopSettings>(&text).ok())
            });
            Ok(Box::new(DamageTriageApp::new(
                cmd_tx, ui_rx, startup, catalog, persisted,
            )))
        }),
    )
}
