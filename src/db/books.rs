use rusqlite::{params, Connection, Row};

use super::error::StoreResult;
use crate::models::{parse_read_status, read_status_text, Book, NewBook, SearchField, Statistics};

const BOOK_COLUMNS: &str = "id, Title, Author, Publication_Year, Genre, Read_Status";

/// Insert a single row and hand back the id SQLite assigned to it.
pub(crate) fn insert_book(conn: &Connection, book: &NewBook) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO books (Title, Author, Publication_Year, Genre, Read_Status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            book.title,
            book.author,
            book.publication_year,
            book.genre,
            read_status_text(book.read),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Remove every row carrying exactly this title. Duplicate titles all go at
/// once; the count tells the caller how many were affected.
pub(crate) fn delete_books_by_title(conn: &Connection, title: &str) -> StoreResult<usize> {
    let deleted = conn.execute("DELETE FROM books WHERE Title = ?1", params![title])?;
    Ok(deleted)
}

pub(crate) fn delete_book(conn: &Connection, id: i64) -> StoreResult<bool> {
    let deleted = conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

/// Every book ordered by id, which matches insertion order because ids are
/// never reused.
pub(crate) fn fetch_books(conn: &Connection) -> StoreResult<Vec<Book>> {
    let mut stmt = conn.prepare(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))?;
    let books = stmt
        .query_map([], book_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(books)
}

/// Substring search on one column. Only the column name is spliced into the
/// SQL and it comes from a closed enum; the term itself is bound and has its
/// `LIKE` wildcards escaped so `%` and `_` match literally.
pub(crate) fn search_books(
    conn: &Connection,
    field: SearchField,
    term: &str,
) -> StoreResult<Vec<Book>> {
    let sql = format!(
        "SELECT {BOOK_COLUMNS} FROM books WHERE {} LIKE ?1 ESCAPE '\\' ORDER BY id",
        field.column()
    );
    let pattern = format!("%{}%", escape_like(term));

    let mut stmt = conn.prepare(&sql)?;
    let books = stmt
        .query_map(params![pattern], book_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(books)
}

/// Count all rows and the rows marked read in one pass.
pub(crate) fn fetch_statistics(conn: &Connection) -> StoreResult<Statistics> {
    let (total, read): (i64, i64) = conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(CASE WHEN Read_Status = 'True' THEN 1 ELSE 0 END), 0)
         FROM books",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(Statistics::from_counts(total.max(0) as u64, read.max(0) as u64))
}

/// Columns are nullable in catalogs created by older tools, so missing text
/// decodes as an empty string.
fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    let read_status: Option<String> = row.get(5)?;
    Ok(Book {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        author: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        publication_year: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        genre: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        read: parse_read_status(read_status.as_deref()),
    })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
