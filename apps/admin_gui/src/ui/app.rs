use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use client_core::{row::EditableCell, CatalogTable, RowView};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorCategory, UiEvent},
    orchestration::dispatch_backend_command,
};

const EDITABLE_CELLS: [EditableCell; 3] =
    [EditableCell::Name, EditableCell::Category, EditableCell::Price];
const CELL_WIDTH: f32 = 160.0;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub service_url: String,
}

struct StatusBanner {
    error: UiError,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Connection",
        UiErrorCategory::Service => "Service",
        UiErrorCategory::Validation => "Data",
        UiErrorCategory::Unknown => "Error",
    }
}

pub struct AdminApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    table: Arc<Mutex<CatalogTable>>,
    service_url: String,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl AdminApp {
    /// Builds the window state and queues the initial sync.
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        table: Arc<Mutex<CatalogTable>>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            table,
            service_url: startup.service_url,
            status: "Loading products...".to_string(),
            status_banner: None,
        };
        app.dispatch(BackendCommand::Sync);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn lock_table(table: &Mutex<CatalogTable>) -> MutexGuard<'_, CatalogTable> {
        table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(error) => {
                    tracing::warn!(context = ?error.context(), "{}", error.message());
                    self.status = error.hint().to_string();
                    self.status_banner = Some(StatusBanner { error });
                }
                UiEvent::CommandFinished(name) => {
                    tracing::debug!(command = name, "backend command finished");
                    let table = Arc::clone(&self.table);
                    let table = Self::lock_table(&table);
                    if let Some(notice) = table.notice() {
                        self.status = notice.message.clone();
                        self.status_banner =
                            UiError::from_notice(notice).map(|error| StatusBanner { error });
                    }
                }
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("catalog-top-bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Product catalog");
                ui.separator();
                ui.weak(&self.service_url);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Refresh").clicked() {
                        self.dispatch(BackendCommand::Sync);
                    }
                });
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("catalog-status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut dismiss = false;
                if let Some(banner) = &self.status_banner {
                    ui.colored_label(
                        egui::Color32::from_rgb(0xd9, 0x4f, 0x4f),
                        format!(
                            "{}: {}",
                            err_label(banner.error.category()),
                            banner.error.message()
                        ),
                    );
                    dismiss = ui.small_button("Dismiss").clicked();
                } else {
                    ui.label(&self.status);
                }
                if dismiss {
                    self.status_banner = None;
                    Self::lock_table(&self.table).dismiss_notice();
                }
            });
        });
    }

    fn show_create_form(&mut self, ui: &mut egui::Ui) {
        let table = Arc::clone(&self.table);
        let mut table = Self::lock_table(&table);
        let creating = table.is_creating();
        let mut submit = false;

        ui.horizontal(|ui| {
            let form = table.form_mut();
            for (text, hint, id) in [
                (&mut form.name, "Name", "productName"),
                (&mut form.category_id, "Category", "productCategory"),
                (&mut form.price, "Price", "productPrice"),
            ] {
                ui.add(
                    egui::TextEdit::singleline(text)
                        .id_salt(id)
                        .hint_text(hint)
                        .desired_width(CELL_WIDTH),
                );
            }
            submit = ui
                .add_enabled(!creating, egui::Button::new("Add product"))
                .clicked();
        });
        drop(table);

        if submit {
            self.dispatch(BackendCommand::CreateProduct);
        }
    }

    fn show_products_list(&mut self, ui: &mut egui::Ui) {
        let table = Arc::clone(&self.table);
        let mut table = Self::lock_table(&table);
        let delete_pending: Vec<bool> = table
            .rows()
            .iter()
            .map(|row| table.is_delete_pending(row.product_id()))
            .collect();
        let mut commands = Vec::new();

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("products-list")
                .striped(true)
                .num_columns(5)
                .show(ui, |ui| {
                    for header in ["ID", "Name", "Category", "Price", ""] {
                        ui.strong(header);
                    }
                    ui.end_row();

                    for (row, pending) in table.rows_mut().zip(delete_pending) {
                        render_row(ui, row, pending, &mut commands);
                        ui.end_row();
                    }
                });
        });
        drop(table);

        for cmd in commands {
            self.dispatch(cmd);
        }
    }
}

fn render_row(
    ui: &mut egui::Ui,
    row: &mut RowView,
    delete_pending: bool,
    commands: &mut Vec<BackendCommand>,
) {
    ui.label(row.product_id().as_str());
    for cell in EDITABLE_CELLS {
        match row.cell_mut(cell) {
            Some(text) => {
                ui.add(egui::TextEdit::singleline(text).desired_width(CELL_WIDTH));
            }
            None => {
                ui.label(row.cell(cell));
            }
        }
    }

    ui.horizontal(|ui| {
        if ui
            .add_enabled(row.control_enabled(), egui::Button::new(row.control_label()))
            .clicked()
        {
            commands.push(BackendCommand::ActivateRow {
                handle: row.handle(),
            });
        }
        if ui
            .add_enabled(
                !delete_pending && row.is_deletable(),
                egui::Button::new(client_core::row::DELETE_LABEL),
            )
            .clicked()
        {
            commands.push(BackendCommand::DeleteProduct {
                product_id: row.product_id().clone(),
            });
        }
    });
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_top_bar(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_create_form(ui);
            ui.separator();
            self.show_products_list(ui);
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
