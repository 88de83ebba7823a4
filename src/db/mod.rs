//! Persistence layer for the catalog, split across logical submodules.

mod books;
mod connection;
mod error;

#[cfg(test)]
mod tests;

pub use connection::BookStore;
pub use error::{StoreError, StoreResult};
