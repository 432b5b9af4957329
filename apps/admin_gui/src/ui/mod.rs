//! UI layer for the admin GUI: app shell, create form, product grid.

pub mod app;

pub use app::{AdminApp, StartupConfig};
