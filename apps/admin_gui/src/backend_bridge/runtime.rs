//! Runtime bridge between UI command queue and the catalog controller.

use std::{
    sync::{Arc, Mutex},
    thread,
};

use client_core::{CatalogTable, CatalogViewController, HttpProductService, ServiceSettings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

type Controller = CatalogViewController<HttpProductService, CatalogTable>;

pub fn launch(
    settings: ServiceSettings,
    table: Arc<Mutex<CatalogTable>>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let service = match HttpProductService::new(&settings) {
            Ok(service) => Arc::new(service),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                tracing::error!(service_url = %settings.service_url, "invalid product service configuration: {err}");
                return;
            }
        };
        tracing::info!(base_url = %service.base_url(), "product service configured");
        let controller = Controller::new(service, table);
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let controller = controller.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let name = cmd.name();
                    run_command(&controller, cmd).await;
                    let _ = ui_tx.try_send(UiEvent::CommandFinished(name));
                });
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

async fn run_command(controller: &Controller, cmd: BackendCommand) {
    match cmd {
        BackendCommand::Sync => controller.fetch_all().await,
        BackendCommand::CreateProduct => controller.create_product().await,
        BackendCommand::ActivateRow { handle } => controller.activate_row(handle).await,
        BackendCommand::DeleteProduct { product_id } => {
            controller.delete_product(product_id).await
        }
    }
}
