use std::sync::{Arc, Mutex};

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, CatalogTable};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{AdminApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Overrides catalog.toml and the environment.
    #[arg(long)]
    service_url: Option<String>,
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(service_url) = args.service_url {
        settings.service_url = service_url;
    }
    if let Some(timeout) = args.request_timeout_secs {
        settings.request_timeout_secs = Some(timeout);
    }
    let startup = StartupConfig {
        service_url: settings.service_url.clone(),
    };

    let table = Arc::new(Mutex::new(CatalogTable::new()));
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(settings, Arc::clone(&table), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Product Catalog Admin")
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Product Catalog Admin",
        options,
        Box::new(move |_cc| Ok(Box::new(AdminApp::bootstrap(cmd_tx, ui_rx, table, startup)))),
    )
}
