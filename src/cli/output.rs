//! Output formatting for the non-interactive subcommands.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::models::{Book, Statistics};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Human,
    /// JSON for programmatic consumption
    Json,
}

const HEADERS: [&str; 6] = ["ID", "Title", "Author", "Year", "Genre", "Read"];

/// Print a list of books, or `empty_message` when there are none.
pub fn write_books<W: Write>(
    out: &mut W,
    books: &[Book],
    format: OutputFormat,
    empty_message: &str,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &books),
        OutputFormat::Human if books.is_empty() => {
            writeln!(out, "{empty_message}").context("failed to write output")
        }
        OutputFormat::Human => {
            for line in book_table(books) {
                writeln!(out, "{line}").context("failed to write output")?;
            }
            Ok(())
        }
    }
}

pub fn write_statistics<W: Write>(
    out: &mut W,
    stats: &Statistics,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, stats),
        OutputFormat::Human => {
            writeln!(out, "Total Books: {}", stats.total).context("failed to write output")?;
            writeln!(out, "Read Books Percentage: {}", stats.read_percentage_label())
                .context("failed to write output")
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to serialize output")?;
    writeln!(out).context("failed to write output")
}

/// Lay the books out as a padded text table, header row first.
fn book_table(books: &[Book]) -> Vec<String> {
    let rows: Vec<[String; 6]> = books
        .iter()
        .map(|book| {
            [
                book.id.to_string(),
                book.title.clone(),
                book.author.clone(),
                book.publication_year.clone(),
                book.genre.clone(),
                book.read_label().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 6]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(HEADERS));
    for row in &rows {
        lines.push(format_row([
            &row[0], &row[1], &row[2], &row[3], &row[4], &row[5],
        ]));
    }
    lines
}
