//! Rendering port used by the catalog controller, plus the in-memory table
//! that front ends draw from.

use std::collections::HashSet;

use shared::domain::{Product, ProductId};

use crate::{
    error::FailureKind,
    row::{RowHandle, RowView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPosition {
    Prepend,
    Append,
}

/// The three free-text inputs of the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub category_id: String,
    pub price: String,
}

impl ProductForm {
    pub fn to_draft(&self) -> Product {
        Product::draft(
            self.name.clone(),
            self.category_id.clone(),
            self.price.clone(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Sync,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sync => "load products",
            Self::Create => "create product",
            Self::Update => "update product",
            Self::Delete => "delete product",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub operation: Operation,
    pub failure: Option<FailureKind>,
    pub message: String,
}

impl Notice {
    pub fn info(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            failure: None,
            message: message.into(),
        }
    }

    pub fn failure(operation: Operation, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            failure: Some(kind),
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Everything the controller reads from or writes to the rendered view.
pub trait RenderPort {
    fn clear_rows(&mut self);
    fn insert_row(&mut self, product: &Product, position: RowPosition) -> RowHandle;
    fn row_mut(&mut self, handle: RowHandle) -> Option<&mut RowView>;

    fn read_form(&self) -> ProductForm;
    fn clear_form(&mut self);

    /// Returns `false` when a create is already in flight.
    fn begin_create(&mut self) -> bool;
    fn end_create(&mut self);
    /// Returns `false` when a delete for this id is already in flight.
    fn begin_delete(&mut self, product_id: &ProductId) -> bool;
    fn end_delete(&mut self, product_id: &ProductId);

    fn notify(&mut self, notice: Notice);

    /// Replaces every row, keeping the given order.
    fn render(&mut self, products: &[Product]) {
        self.clear_rows();
        for product in products {
            self.insert_row(product, RowPosition::Append);
        }
    }
}

#[derive(Debug, Default)]
pub struct CatalogTable {
    rows: Vec<RowView>,
    form: ProductForm,
    next_handle: u64,
    creating: bool,
    pending_deletes: HashSet<ProductId>,
    notice: Option<Notice>,
}

impl CatalogTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut RowView> {
        self.rows.iter_mut()
    }

    pub fn row(&self, handle: RowHandle) -> Option<&RowView> {
        self.rows.iter().find(|row| row.handle() == handle)
    }

    pub fn handles(&self) -> Vec<RowHandle> {
        self.rows.iter().map(RowView::handle).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn is_delete_pending(&self, product_id: &ProductId) -> bool {
        self.pending_deletes.contains(product_id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn allocate_handle(&mut self) -> RowHandle {
        self.next_handle += 1;
        RowHandle(self.next_handle)
    }
}

impl RenderPort for CatalogTable {
    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn insert_row(&mut self, product: &Product, position: RowPosition) -> RowHandle {
        let handle = self.allocate_handle();
        let row = RowView::new(handle, product);
        if !row.is_deletable() {
            tracing::warn!(row = handle.0, name = %product.name, "rendering product without an id");
        }
        match position {
            RowPosition::Prepend => self.rows.insert(0, row),
            RowPosition::Append => self.rows.push(row),
        }
        handle
    }

    fn row_mut(&mut self, handle: RowHandle) -> Option<&mut RowView> {
        self.rows.iter_mut().find(|row| row.handle() == handle)
    }

    fn read_form(&self) -> ProductForm {
        self.form.clone()
    }

    fn clear_form(&mut self) {
        self.form = ProductForm::default();
    }

    fn begin_create(&mut self) -> bool {
        !std::mem::replace(&mut self.creating, true)
    }

    fn end_create(&mut self) {
        self.creating = false;
    }

    fn begin_delete(&mut self, product_id: &ProductId) -> bool {
        self.pending_deletes.insert(product_id.clone())
    }

    fn end_delete(&mut self, product_id: &ProductId) {
        self.pending_deletes.remove(product_id);
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}
