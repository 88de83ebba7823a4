use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

use super::*;
use crate::models::{NewBook, SearchField};

fn open_store() -> (TempDir, BookStore) {
    let dir = tempdir().unwrap();
    let store = BookStore::new(dir.path().join("books.sqlite"));
    store.initialize().unwrap();
    (dir, store)
}

fn sample(title: &str, genre: &str, read: bool) -> NewBook {
    NewBook::new(title, "Some Author", "2001", genre, read)
}

// ===========================================
// Schema
// ===========================================

#[test]
fn initialize_twice_is_harmless() {
    let (_dir, store) = open_store();
    store.initialize().unwrap();

    let conn = rusqlite::Connection::open(store.path()).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'books'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
}

#[test]
fn initialize_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("books.sqlite");
    let store = BookStore::new(&path);

    store.initialize().unwrap();

    assert!(path.exists(), "database file should be created");
}

#[test]
fn initialize_fails_when_parent_is_a_file() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let store = BookStore::new(blocker.join("books.sqlite"));

    let err = store.initialize().unwrap_err();

    assert!(
        matches!(err, StoreError::Database(_) | StoreError::Io { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn operations_fail_without_schema() {
    let dir = tempdir().unwrap();
    let store = BookStore::new(dir.path().join("empty.sqlite"));

    let err = store.list_all().unwrap_err();

    assert!(matches!(err, StoreError::Database(_)));
}

// ===========================================
// add / list_all
// ===========================================

#[test]
fn empty_store_lists_nothing() {
    let (_dir, store) = open_store();
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn added_book_is_listed_with_its_fields() {
    let (_dir, store) = open_store();
    let new_book = NewBook::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true);

    let id = store.add(&new_book).unwrap();

    let books = store.list_all().unwrap();
    assert_eq!(books, vec![new_book.into_book(id)]);
}

#[test]
fn add_accepts_empty_strings() {
    let (_dir, store) = open_store();

    let id = store.add(&NewBook::default()).unwrap();

    let books = store.list_all().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, id);
    assert_eq!(books[0].title, "");
    assert!(!books[0].read);
}

#[test]
fn ids_are_fresh_and_never_reused() {
    let (_dir, store) = open_store();
    let first = store.add(&sample("One", "Drama", false)).unwrap();
    let second = store.add(&sample("Two", "Drama", false)).unwrap();
    assert!(second > first);

    store.remove("Two").unwrap();
    let third = store.add(&sample("Three", "Drama", false)).unwrap();

    assert!(third > second, "ids must not be recycled after deletes");
}

#[test]
fn list_all_keeps_insertion_order() {
    let (_dir, store) = open_store();
    for title in ["Zebra", "Apple", "Mango"] {
        store.add(&sample(title, "Nature", false)).unwrap();
    }

    let titles: Vec<String> = store.list_all().unwrap().into_iter().map(|b| b.title).collect();

    assert_eq!(titles, vec!["Zebra", "Apple", "Mango"]);
}

#[test]
fn duplicate_titles_are_allowed() {
    let (_dir, store) = open_store();
    store.add(&sample("Twin", "Drama", false)).unwrap();
    store.add(&sample("Twin", "Drama", true)).unwrap();

    assert_eq!(store.list_all().unwrap().len(), 2);
}

#[test]
fn legacy_read_status_values_decode_as_unread() {
    let (_dir, store) = open_store();
    let conn = rusqlite::Connection::open(store.path()).unwrap();
    conn.execute(
        "INSERT INTO books (Title, Author, Publication_Year, Genre, Read_Status)
         VALUES ('Old', NULL, '1999', 'Essay', 'yes')",
        [],
    )
    .unwrap();
    drop(conn);

    let books = store.list_all().unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].author, "");
    assert!(!books[0].read);
}

// ===========================================
// remove
// ===========================================

#[test]
fn remove_missing_title_changes_nothing() {
    let (_dir, store) = open_store();
    store.add(&sample("Present", "Drama", false)).unwrap();
    let before = store.list_all().unwrap();

    assert_eq!(store.remove("Absent").unwrap(), 0);
    assert_eq!(store.list_all().unwrap(), before);
}

#[test]
fn remove_single_match_deletes_it() {
    let (_dir, store) = open_store();
    store.add(&sample("Keep", "Drama", false)).unwrap();
    store.add(&sample("Drop", "Drama", false)).unwrap();

    assert_eq!(store.remove("Drop").unwrap(), 1);

    let titles: Vec<String> = store.list_all().unwrap().into_iter().map(|b| b.title).collect();
    assert_eq!(titles, vec!["Keep"]);
}

#[test]
fn remove_deletes_every_duplicate() {
    let (_dir, store) = open_store();
    store.add(&sample("Twin", "Drama", false)).unwrap();
    store.add(&sample("Twin", "Poetry", true)).unwrap();
    store.add(&sample("Other", "Drama", false)).unwrap();

    assert_eq!(store.remove("Twin").unwrap(), 2);
    assert_eq!(store.list_all().unwrap().len(), 1);
}

#[test]
fn remove_requires_exact_title() {
    let (_dir, store) = open_store();
    store.add(&sample("The Hobbit", "Fantasy", false)).unwrap();

    assert_eq!(store.remove("Hobbit").unwrap(), 0);
    assert_eq!(store.remove("The Hobbit").unwrap(), 1);
}

#[test]
fn remove_by_id_only_touches_one_duplicate() {
    let (_dir, store) = open_store();
    let first = store.add(&sample("Twin", "Drama", false)).unwrap();
    let second = store.add(&sample("Twin", "Drama", true)).unwrap();

    assert!(store.remove_by_id(first).unwrap());
    assert!(!store.remove_by_id(first).unwrap());

    let remaining = store.list_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second);
}

// ===========================================
// search
// ===========================================

#[test]
fn search_matches_substrings_in_chosen_field() {
    let (_dir, store) = open_store();
    store.add(&sample("Dune", "Sci-Fi", false)).unwrap();
    store.add(&sample("Emma", "Fiction", false)).unwrap();
    store.add(&sample("Cosmos", "Science", false)).unwrap();

    let titles: Vec<String> = store
        .search(SearchField::Genre, "Fi")
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();

    assert_eq!(titles, vec!["Dune", "Emma"]);
}

#[test]
fn search_only_looks_at_the_chosen_column() {
    let (_dir, store) = open_store();
    store.add(&NewBook::new("Fire", "Ann", "2000", "Drama", false)).unwrap();
    store.add(&NewBook::new("Water", "Fiona", "2000", "Drama", false)).unwrap();

    let by_title = store.search(SearchField::Title, "Fi").unwrap();
    let by_author = store.search(SearchField::Author, "Fi").unwrap();

    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "Fire");
    assert_eq!(by_author.len(), 1);
    assert_eq!(by_author[0].title, "Water");
}

#[test]
fn search_by_read_status_uses_stored_text() {
    let (_dir, store) = open_store();
    store.add(&sample("Read", "Drama", true)).unwrap();
    store.add(&sample("Unread", "Drama", false)).unwrap();

    let read = store.search(SearchField::ReadStatus, "True").unwrap();

    assert_eq!(read.len(), 1);
    assert_eq!(read[0].title, "Read");
}

#[test]
fn search_treats_wildcards_literally() {
    let (_dir, store) = open_store();
    store.add(&sample("100% Pure", "Drama", false)).unwrap();
    store.add(&sample("1000 Pure", "Drama", false)).unwrap();
    store.add(&sample("snake_case", "Drama", false)).unwrap();
    store.add(&sample("snakeXcase", "Drama", false)).unwrap();

    let percent = store.search(SearchField::Title, "0%").unwrap();
    let underscore = store.search(SearchField::Title, "e_c").unwrap();

    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].title, "100% Pure");
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].title, "snake_case");
}

#[test]
fn search_without_matches_is_empty() {
    let (_dir, store) = open_store();
    store.add(&sample("Dune", "Sci-Fi", false)).unwrap();

    assert!(store.search(SearchField::Author, "Tolkien").unwrap().is_empty());
}

#[test]
fn search_with_empty_term_matches_everything() {
    let (_dir, store) = open_store();
    store.add(&sample("A", "Drama", false)).unwrap();
    store.add(&sample("B", "Drama", false)).unwrap();

    assert_eq!(store.search(SearchField::Title, "").unwrap().len(), 2);
}

// ===========================================
// statistics
// ===========================================

#[test]
fn statistics_on_empty_store() {
    let (_dir, store) = open_store();

    let stats = store.statistics().unwrap();

    assert_eq!(stats.total, 0);
    assert_eq!(stats.read_percentage, 0.0);
}

#[test]
fn statistics_count_read_share() {
    let (_dir, store) = open_store();
    store.add(&sample("A", "Drama", true)).unwrap();
    store.add(&sample("B", "Drama", false)).unwrap();
    store.add(&sample("C", "Drama", false)).unwrap();
    store.add(&sample("D", "Drama", false)).unwrap();

    let stats = store.statistics().unwrap();

    assert_eq!(stats.total, 4);
    assert_eq!(stats.read_percentage, 25.0);
    assert_eq!(stats.read_percentage_label(), "25.0%");
}
