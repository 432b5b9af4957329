//! Catalog view controller: syncs the rendered table with the product
//! service and drives per-row edits.
//!
//! Every public operation is terminal. Failures are logged, posted to the
//! view as a [`Notice`] and otherwise swallowed; the view lock is never held
//! across a request.

use std::sync::{Arc, Mutex, PoisonError};

use shared::domain::ProductId;
use tracing::{debug, error, info, warn};

use crate::{
    error::CatalogError,
    row::{RowAction, RowHandle},
    view::{Notice, Operation, RenderPort, RowPosition},
    ProductService,
};

pub struct CatalogViewController<S: ?Sized, P> {
    service: Arc<S>,
    view: Arc<Mutex<P>>,
}

impl<S: ?Sized, P> Clone for CatalogViewController<S, P> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            view: Arc::clone(&self.view),
        }
    }
}

impl<S, P> CatalogViewController<S, P>
where
    S: ProductService + ?Sized,
    P: RenderPort,
{
    pub fn new(service: Arc<S>, view: Arc<Mutex<P>>) -> Self {
        Self { service, view }
    }

    pub fn view(&self) -> &Arc<Mutex<P>> {
        &self.view
    }

    fn with_view<T>(&self, f: impl FnOnce(&mut P) -> T) -> T {
        let mut guard = self.view.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Re-fetches the whole collection and re-renders it in server order.
    pub async fn fetch_all(&self) {
        match self.service.list_all().await {
            Ok(products) => {
                info!(count = products.len(), "catalog synced");
                self.with_view(|view| {
                    view.render(&products);
                    view.notify(Notice::info(
                        Operation::Sync,
                        format!("Loaded {} products", products.len()),
                    ));
                });
            }
            Err(err) => self.with_view(|view| report_failure(view, Operation::Sync, &err)),
        }
    }

    /// Posts the create form; the saved product is prepended and the form cleared.
    pub async fn create_product(&self) {
        let draft = self.with_view(|view| view.begin_create().then(|| view.read_form().to_draft()));
        let Some(draft) = draft else {
            debug!("create already in flight; ignoring");
            return;
        };

        let result = self.service.save(&draft).await;
        self.with_view(|view| {
            view.end_create();
            match result {
                Ok(saved) => {
                    let product_id = saved.id().map(ToString::to_string).unwrap_or_default();
                    info!(product_id = %product_id, "product created");
                    view.insert_row(&saved, RowPosition::Prepend);
                    view.clear_form();
                    view.notify(Notice::info(
                        Operation::Create,
                        format!("Created product {product_id}"),
                    ));
                }
                Err(err) => report_failure(view, Operation::Create, &err),
            }
        });
    }

    /// Deletes on the service, then resyncs instead of removing the row locally.
    /// The id stays pending until the resync has replaced the row.
    pub async fn delete_product(&self, product_id: ProductId) {
        if product_id.as_str().is_empty() {
            warn!("delete requested for a product without an id; ignoring");
            return;
        }
        if !self.with_view(|view| view.begin_delete(&product_id)) {
            debug!(product_id = %product_id, "delete already in flight; ignoring");
            return;
        }

        match self.service.delete(&product_id).await {
            Ok(()) => {
                info!(product_id = %product_id, "product deleted");
                self.with_view(|view| {
                    view.notify(Notice::info(
                        Operation::Delete,
                        format!("Deleted product {product_id}"),
                    ))
                });
                self.fetch_all().await;
                self.with_view(|view| view.end_delete(&product_id));
            }
            Err(err) => self.with_view(|view| {
                view.end_delete(&product_id);
                report_failure(view, Operation::Delete, &err);
            }),
        }
    }

    /// Edit/save control of a row: enters editing, or saves the live cell text.
    pub async fn activate_row(&self, handle: RowHandle) {
        let action = self.with_view(|view| view.row_mut(handle).map(|row| row.activate()));

        let product = match action {
            None => {
                warn!(row = handle.0, "row control activated for a row that is no longer rendered");
                return;
            }
            Some(RowAction::Ignored) => {
                debug!(row = handle.0, "save already in flight; ignoring");
                return;
            }
            Some(RowAction::BeganEditing) => {
                debug!(row = handle.0, "row editing");
                return;
            }
            Some(RowAction::Save(product)) => product,
        };

        let result = self.service.update(&product).await;
        self.with_view(|view| {
            let saved = match &result {
                Ok(()) => {
                    let product_id = product.id().map(ToString::to_string).unwrap_or_default();
                    info!(product_id = %product_id, "product updated");
                    view.notify(Notice::info(
                        Operation::Update,
                        format!("Saved product {product_id}"),
                    ));
                    true
                }
                Err(err) => {
                    report_failure(view, Operation::Update, err);
                    false
                }
            };

            match view.row_mut(handle) {
                Some(row) => row.finish_save(saved),
                None => debug!(row = handle.0, "row replaced before its save completed"),
            }
        });
    }
}

fn report_failure<P: RenderPort + ?Sized>(view: &mut P, operation: Operation, err: &CatalogError) {
    error!(operation = operation.label(), error = %err, "catalog operation failed");
    view.notify(Notice::failure(
        operation,
        err.kind(),
        format!("Failed to {}: {err}", operation.label()),
    ));
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
