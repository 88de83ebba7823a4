//! Domain models that mirror the `books` table and get passed between the
//! store, the TUI and the command-line front-end. These stay light-weight data
//! holders so the other layers can focus on presentation and persistence.

use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Column text written for a book that has been read.
pub const READ_TRUE: &str = "True";
/// Column text written for a book that has not been read yet.
pub const READ_FALSE: &str = "False";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single persisted book.
pub struct Book {
    /// Primary key assigned by SQLite. Stable for the lifetime of the row.
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Free text. Usually a four digit year but never validated.
    pub publication_year: String,
    pub genre: String,
    /// Stored on disk as `"True"`/`"False"` for compatibility with existing
    /// catalogs, but callers only ever see a real boolean.
    #[serde(rename = "read_status")]
    pub read: bool,
}

impl Book {
    /// Text shown wherever a read flag needs to be rendered.
    pub fn read_label(&self) -> &'static str {
        read_status_text(self.read)
    }
}

/// Insert payload for a book that has not been assigned an id yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publication_year: String,
    pub genre: String,
    pub read: bool,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: impl Into<String>,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year: publication_year.into(),
            genre: genre.into(),
            read,
        }
    }

    /// Attach the id handed back by the store.
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
            genre: self.genre,
            read: self.read,
        }
    }
}

/// Encode the read flag the way the `Read_Status` column expects it.
pub fn read_status_text(read: bool) -> &'static str {
    if read {
        READ_TRUE
    } else {
        READ_FALSE
    }
}

/// Decode a `Read_Status` column value. Only the exact string `"True"` counts
/// as read, matching what the statistics query counts.
pub fn parse_read_status(raw: Option<&str>) -> bool {
    raw == Some(READ_TRUE)
}

/// The only columns a search may filter on. The column name ends up inside
/// the SQL text, so it must never come from anywhere but this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Author,
    Genre,
    ReadStatus,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Title,
        SearchField::Author,
        SearchField::Genre,
        SearchField::ReadStatus,
    ];

    /// Column name inside the `books` table.
    pub fn column(self) -> &'static str {
        match self {
            SearchField::Title => "Title",
            SearchField::Author => "Author",
            SearchField::Genre => "Genre",
            SearchField::ReadStatus => "Read_Status",
        }
    }

    /// Human label used by the search form.
    pub fn label(self) -> &'static str {
        match self {
            SearchField::Title => "Title",
            SearchField::Author => "Author",
            SearchField::Genre => "Genre",
            SearchField::ReadStatus => "Read Status",
        }
    }

    /// Step through [`SearchField::ALL`], wrapping at either end.
    pub fn cycle(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let idx = Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0) as isize;
        Self::ALL[(idx + delta).rem_euclid(len) as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search field '{0}' (expected title, author, genre or read_status)")]
pub struct UnknownSearchField(pub String);

impl FromStr for SearchField {
    type Err = UnknownSearchField;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "genre" => Ok(SearchField::Genre),
            "read_status" | "read" => Ok(SearchField::ReadStatus),
            _ => Err(UnknownSearchField(raw.to_string())),
        }
    }
}

/// Aggregate numbers shown on the statistics screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub total: u64,
    /// Share of books marked read, in percent. Zero for an empty catalog.
    /// Serialized with one decimal digit, like the on-screen label.
    #[serde(serialize_with = "serialize_one_decimal")]
    pub read_percentage: f64,
}

impl Statistics {
    pub fn from_counts(total: u64, read: u64) -> Self {
        let read_percentage = if total == 0 {
            0.0
        } else {
            read as f64 / total as f64 * 100.0
        };
        Self {
            total,
            read_percentage,
        }
    }

    /// Percentage with one decimal digit, e.g. `25.0%`.
    pub fn read_percentage_label(&self) -> String {
        format!("{:.1}%", self.read_percentage)
    }
}

fn serialize_one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 10.0).round() / 10.0)
}
