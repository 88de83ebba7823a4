//! Ratatui front-end. A sidebar mirrors the five catalog actions and each
//! screen is a thin caller of the matching [`BookStore`](crate::db::BookStore)
//! operation.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
