//! Core library surface for the Book Catalog application.
//!
//! The store in [`db`] owns the `books` table; the [`cli`] and [`ui`]
//! front-ends are thin callers of its five operations.
pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer.
pub use db::{BookStore, StoreError, StoreResult};

/// Domain types passed between the store and the front-ends.
pub use models::{Book, NewBook, SearchField, Statistics};

pub use config::Config;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
