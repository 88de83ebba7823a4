//! Command-line front-end. Every subcommand is a thin caller of one store
//! operation; running without a subcommand opens the TUI instead.

pub mod output;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::db::BookStore;
use crate::models::{NewBook, SearchField};
use output::{write_books, write_statistics, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "book-catalog")]
#[command(author, version, about = "Keep track of the books you own and have read", long_about = None)]
pub struct Cli {
    /// Path to the SQLite catalog (overrides BOOK_CATALOG_DB)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a book to the catalog
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        /// Publication year (free text)
        #[arg(long, default_value = "")]
        year: String,
        #[arg(long, default_value = "")]
        genre: String,
        /// Mark the book as already read
        #[arg(long)]
        read: bool,
    },
    /// Remove every book with exactly this title
    Remove {
        title: String,
    },
    /// Display all books
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
    /// Search one field for a substring
    Search {
        /// Field to search: title, author, genre or read_status
        #[arg(long, default_value = "title")]
        by: SearchField,
        term: String,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
    /// Display catalog statistics
    Stats {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
}

/// Execute a subcommand against an initialized store, writing to stdout.
pub fn run(store: &BookStore, command: Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(store, command, &mut out)
}

fn execute<W: Write>(store: &BookStore, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Add {
            title,
            author,
            year,
            genre,
            read,
        } => {
            let book = NewBook::new(title, author, year, genre, read);
            let id = store.add(&book).context("failed to add book")?;
            writeln!(out, "Book: '{}' successfully added (id {id})", book.title)?;
        }
        Command::Remove { title } => {
            let deleted = store.remove(&title).context("failed to remove book")?;
            writeln!(out, "{}", removal_message(&title, deleted))?;
        }
        Command::List { format } => {
            let books = store.list_all().context("failed to list books")?;
            write_books(out, &books, format, "No books available.")?;
        }
        Command::Search { by, term, format } => {
            let books = store.search(by, &term).context("failed to search books")?;
            write_books(out, &books, format, "No matching books found.")?;
        }
        Command::Stats { format } => {
            let stats = store.statistics().context("failed to compute statistics")?;
            write_statistics(out, &stats, format)?;
        }
    }
    Ok(())
}

/// Message shown after a remove-by-title. Zero deletions are reported as a
/// warning rather than an error.
pub fn removal_message(title: &str, deleted: usize) -> String {
    match deleted {
        0 => format!("Book: '{title}' not found"),
        1 => format!("Book: '{title}' successfully deleted"),
        n => format!("Book: '{title}' successfully deleted ({n} copies)"),
    }
}
