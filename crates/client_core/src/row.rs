//! Per-row edit state machine.
//!
//! A row starts read-only. Activating its control either opens the three
//! mutable cells for editing or, when already editing, snapshots the live
//! cell text into an update payload and locks the row until the save
//! completes. A failed save leaves the row editing with its text untouched.

use shared::domain::{Product, ProductId};

pub const EDIT_LABEL: &str = "Edit";
pub const SAVE_LABEL: &str = "Save";
pub const DELETE_LABEL: &str = "Delete";

/// View-local address of a rendered row. Handles are never reused, so a
/// handle from before a resync no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowMode {
    #[default]
    ReadOnly,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableCell {
    Name,
    Category,
    Price,
}

/// What the controller has to do after a row control was activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    BeganEditing,
    Save(Product),
    /// A save for this row is still in flight.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    handle: RowHandle,
    product_id: ProductId,
    name: String,
    category_id: String,
    price: String,
    mode: RowMode,
    saving: bool,
}

impl RowView {
    pub fn new(handle: RowHandle, product: &Product) -> Self {
        Self {
            handle,
            product_id: product
                .product_id
                .clone()
                .unwrap_or_else(|| ProductId::new("")),
            name: product.name.clone(),
            category_id: product.category_id.clone(),
            price: product.price.clone(),
            mode: RowMode::ReadOnly,
            saving: false,
        }
    }

    pub fn handle(&self) -> RowHandle {
        self.handle
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn mode(&self) -> RowMode {
        self.mode
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Identifier, name, category, price, as displayed.
    pub fn cells(&self) -> [&str; 4] {
        [
            self.product_id.as_str(),
            self.name.as_str(),
            self.category_id.as_str(),
            self.price.as_str(),
        ]
    }

    pub fn cell(&self, cell: EditableCell) -> &str {
        match cell {
            EditableCell::Name => &self.name,
            EditableCell::Category => &self.category_id,
            EditableCell::Price => &self.price,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.mode == RowMode::Editing && !self.saving
    }

    pub fn control_label(&self) -> &'static str {
        match self.mode {
            RowMode::ReadOnly => EDIT_LABEL,
            RowMode::Editing => SAVE_LABEL,
        }
    }

    pub fn control_enabled(&self) -> bool {
        !self.saving
    }

    /// Rows the service returned without an id have nothing to delete.
    pub fn is_deletable(&self) -> bool {
        !self.product_id.as_str().is_empty()
    }

    /// Mutable text of a cell, only while the row is editable.
    pub fn cell_mut(&mut self, cell: EditableCell) -> Option<&mut String> {
        if !self.is_editable() {
            return None;
        }
        Some(match cell {
            EditableCell::Name => &mut self.name,
            EditableCell::Category => &mut self.category_id,
            EditableCell::Price => &mut self.price,
        })
    }

    /// Replaces a cell's text; returns `false` when the row is not editable.
    pub fn set_cell(&mut self, cell: EditableCell, text: impl Into<String>) -> bool {
        match self.cell_mut(cell) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    /// Single dispatch for the row's edit/save control.
    pub fn activate(&mut self) -> RowAction {
        if self.saving {
            return RowAction::Ignored;
        }
        match self.mode {
            RowMode::ReadOnly => {
                self.mode = RowMode::Editing;
                RowAction::BeganEditing
            }
            RowMode::Editing => {
                self.saving = true;
                RowAction::Save(self.snapshot())
            }
        }
    }

    pub fn finish_save(&mut self, saved: bool) {
        self.saving = false;
        if saved {
            self.mode = RowMode::ReadOnly;
        }
    }

    /// Update payload from the live cell text; no coercion of any field.
    pub fn snapshot(&self) -> Product {
        Product::draft(
            self.name.clone(),
            self.category_id.clone(),
            self.price.clone(),
        )
        .with_id(self.product_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> RowView {
        RowView::new(
            RowHandle(1),
            &Product::draft("Pen", "A", "1.50").with_id(ProductId::new("1")),
        )
    }

    #[test]
    fn new_rows_are_read_only() {
        let mut row = pen();
        assert_eq!(row.mode(), RowMode::ReadOnly);
        assert_eq!(row.control_label(), EDIT_LABEL);
        assert!(!row.is_editable());
        assert!(!row.set_cell(EditableCell::Name, "Pencil"));
        assert_eq!(row.cells(), ["1", "Pen", "A", "1.50"]);
    }

    #[test]
    fn activation_toggles_edit_then_save() {
        let mut row = pen();
        assert_eq!(row.activate(), RowAction::BeganEditing);
        assert_eq!(row.control_label(), SAVE_LABEL);
        assert!(row.set_cell(EditableCell::Price, "abc"));

        let RowAction::Save(payload) = row.activate() else {
            panic!("expected save action");
        };
        assert_eq!(payload.product_id, Some(ProductId::new("1")));
        assert_eq!(payload.price, "abc");
        assert!(!row.is_editable());
        assert!(!row.control_enabled());
    }

    #[test]
    fn activation_is_ignored_while_saving() {
        let mut row = pen();
        row.activate();
        row.activate();
        assert_eq!(row.activate(), RowAction::Ignored);
    }

    #[test]
    fn failed_save_returns_to_editing_with_text_intact() {
        let mut row = pen();
        row.activate();
        row.set_cell(EditableCell::Name, "Fountain pen");
        row.activate();
        row.finish_save(false);

        assert_eq!(row.mode(), RowMode::Editing);
        assert!(row.is_editable());
        assert_eq!(row.control_label(), SAVE_LABEL);
        assert_eq!(row.cells()[1], "Fountain pen");
    }

    #[test]
    fn successful_save_restores_read_only() {
        let mut row = pen();
        row.activate();
        row.activate();
        row.finish_save(true);

        assert_eq!(row.mode(), RowMode::ReadOnly);
        assert_eq!(row.control_label(), EDIT_LABEL);
        assert!(row.control_enabled());
    }

    #[test]
    fn rows_without_an_id_are_not_deletable() {
        let row = RowView::new(RowHandle(2), &Product::draft("Loose", "A", "1"));
        assert_eq!(row.product_id().as_str(), "");
        assert!(!row.is_deletable());
        assert!(pen().is_deletable());
    }
}
