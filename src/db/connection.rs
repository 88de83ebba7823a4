use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info};

use super::books;
use super::error::{StoreError, StoreResult};
use crate::models::{Book, NewBook, SearchField, Statistics};

/// Handle to the on-disk catalog. It only remembers where the database lives:
/// every operation opens its own connection, runs a single statement and lets
/// the connection drop before returning, so callers never manage connection
/// lifetimes themselves.
#[derive(Debug, Clone)]
pub struct BookStore {
    path: PathBuf,
}

impl BookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the SQLite file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `books` table if it does not exist yet. Safe to call any
    /// number of times.
    pub fn initialize(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = self.connect()?;
        ensure_schema(&conn)?;
        info!(path = %self.path.display(), "book catalog ready");
        Ok(())
    }

    /// Insert a book and return its freshly assigned id.
    pub fn add(&self, book: &NewBook) -> StoreResult<i64> {
        let conn = self.connect()?;
        let id = books::insert_book(&conn, book)?;
        debug!(id, title = %book.title, "added book");
        Ok(id)
    }

    /// Delete every book whose title is exactly `title`. Returns how many rows
    /// went away; zero means nothing matched.
    pub fn remove(&self, title: &str) -> StoreResult<usize> {
        let conn = self.connect()?;
        let deleted = books::delete_books_by_title(&conn, title)?;
        debug!(title, deleted, "removed books by title");
        Ok(deleted)
    }

    /// Delete a single book by primary key.
    pub fn remove_by_id(&self, id: i64) -> StoreResult<bool> {
        let conn = self.connect()?;
        let deleted = books::delete_book(&conn, id)?;
        debug!(id, deleted, "removed book by id");
        Ok(deleted)
    }

    /// Every stored book in insertion order.
    pub fn list_all(&self) -> StoreResult<Vec<Book>> {
        let conn = self.connect()?;
        let books = books::fetch_books(&conn)?;
        debug!(count = books.len(), "listed books");
        Ok(books)
    }

    /// Books whose `field` contains `term` as a substring.
    pub fn search(&self, field: SearchField, term: &str) -> StoreResult<Vec<Book>> {
        let conn = self.connect()?;
        let books = books::search_books(&conn, field, term)?;
        debug!(field = field.column(), term, count = books.len(), "searched books");
        Ok(books)
    }

    /// Total count plus the share of books marked read.
    pub fn statistics(&self) -> StoreResult<Statistics> {
        let conn = self.connect()?;
        let stats = books::fetch_statistics(&conn)?;
        debug!(total = stats.total, read_percentage = stats.read_percentage, "computed statistics");
        Ok(stats)
    }

    fn connect(&self) -> StoreResult<Connection> {
        Ok(Connection::open(&self.path)?)
    }
}

/// Run the idempotent schema creation on an already open connection.
pub(crate) fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            Title TEXT,
            Author TEXT,
            Publication_Year TEXT,
            Genre TEXT,
            Read_Status TEXT
        )",
        [],
    )?;
    Ok(())
}
