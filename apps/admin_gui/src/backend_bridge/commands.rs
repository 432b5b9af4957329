//! Backend commands queued from UI to backend worker.

use client_core::RowHandle;
use shared::domain::ProductId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Sync,
    CreateProduct,
    ActivateRow { handle: RowHandle },
    DeleteProduct { product_id: ProductId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::CreateProduct => "create_product",
            Self::ActivateRow { .. } => "activate_row",
            Self::DeleteProduct { .. } => "delete_product",
        }
    }
}
