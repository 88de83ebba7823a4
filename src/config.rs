//! Resolution of where the catalog database lives.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Environment variable that overrides the default database location.
pub const DB_ENV_VAR: &str = "BOOK_CATALOG_DB";
/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-catalog";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "books.sqlite";
/// Log file written next to the database while the TUI owns the terminal.
const LOG_FILE_NAME: &str = "book-catalog.log";

/// Runtime settings shared by the CLI and the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    /// Resolve the database path.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. `BOOK_CATALOG_DB` environment variable
    /// 3. `~/.book-catalog/books.sqlite`
    ///
    /// Empty values from the flag or the environment are skipped.
    pub fn resolve(cli_db: Option<&Path>) -> Result<Self> {
        let env_db = std::env::var_os(DB_ENV_VAR).map(PathBuf::from);
        Self::resolve_with(cli_db, env_db, default_db_path)
    }

    fn resolve_with(
        cli_db: Option<&Path>,
        env_db: Option<PathBuf>,
        fallback: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<Self> {
        let cli_db = cli_db.filter(|path| !path.as_os_str().is_empty());
        let env_db = env_db.filter(|path| !path.as_os_str().is_empty());
        let db_path = match (cli_db, env_db) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) => path,
            (None, None) => fallback()?,
        };
        Ok(Self { db_path })
    }

    /// File the TUI logs into, kept beside the database.
    pub fn log_path(&self) -> PathBuf {
        match self.db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(LOG_FILE_NAME),
            _ => PathBuf::from(LOG_FILE_NAME),
        }
    }
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
