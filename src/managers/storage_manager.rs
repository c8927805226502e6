//! Storage Manager for NovaBrowse.
//!
//! Implements `StorageManagerTrait`: key/value settings plus the append-only
//! history and bookmark logs, backed by SQLite via `rusqlite`.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};
use rusqlite::{params, OptionalExtension};

use crate::database::connection::Database;
use crate::types::bookmark::Bookmark;
use crate::types::errors::StorageError;
use crate::types::history::HistoryEntry;
use crate::types::settings::{BrowserSettings, SearchEngine, HOMEPAGE_KEY, INTERNAL_HOMEPAGE, SEARCH_ENGINE_KEY};

/// Number of entries the history viewer asks for by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Trait defining the persistence operations the shell relies on.
pub trait StorageManagerTrait {
    /// Returns the stored value for `key`, or `default` when it is absent or
    /// the lookup fails.
    fn get_setting(&self, key: &str, default: &str) -> String;
    fn set_setting(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn add_history_item(&self, url: &str, title: &str) -> Result<i64, StorageError>;
    fn add_bookmark(&self, url: &str, title: &str) -> Result<i64, StorageError>;
    fn get_history(&self, limit: usize) -> Result<Vec<HistoryEntry>, StorageError>;
    fn get_bookmarks(&self) -> Result<Vec<Bookmark>, StorageError>;

    /// Reads the typed user settings, applying defaults for absent keys.
    fn load_settings(&self) -> BrowserSettings {
        BrowserSettings {
            search_engine: SearchEngine::from_setting(
                &self.get_setting(SEARCH_ENGINE_KEY, SearchEngine::default().as_str()),
            ),
            homepage: self.get_setting(HOMEPAGE_KEY, INTERNAL_HOMEPAGE),
        }
    }

    /// Writes both user settings.
    fn save_settings(&self, settings: &BrowserSettings) -> Result<(), StorageError> {
        self.set_setting(SEARCH_ENGINE_KEY, settings.search_engine.as_str())?;
        self.set_setting(HOMEPAGE_KEY, &settings.homepage)
    }
}

/// Storage manager sharing the application's database handle.
///
/// Each call runs as its own autocommit statement, so writes are durable when
/// the call returns.
#[derive(Clone)]
pub struct StorageManager {
    db: Arc<Database>,
}

impl StorageManager {
    /// Creates a new `StorageManager` using the provided database handle.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
        Ok(HistoryEntry {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            timestamp: row.get(3)?,
        })
    }

    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            timestamp: row.get(3)?,
        })
    }
}

impl StorageManagerTrait for StorageManager {
    fn get_setting(&self, key: &str, default: &str) -> String {
        let stored: Result<Option<String>, rusqlite::Error> = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional();

        match stored {
            Ok(Some(value)) => value,
            Ok(None) => default.to_string(),
            Err(e) => {
                warn!("reading setting '{}' failed, using default: {}", key, e);
                default.to_string()
            }
        }
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.connection().execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        debug!("setting '{}' saved", key);
        Ok(())
    }

    /// Appends a history entry and returns its row id.
    fn add_history_item(&self, url: &str, title: &str) -> Result<i64, StorageError> {
        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO history (url, title, timestamp) VALUES (?1, ?2, ?3)",
            params![url, title, Self::now()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Appends a bookmark and returns its row id. Duplicates are kept.
    fn add_bookmark(&self, url: &str, title: &str) -> Result<i64, StorageError> {
        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO bookmarks (url, title, timestamp) VALUES (?1, ?2, ?3)",
            params![url, title, Self::now()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Lists up to `limit` history entries, newest first. Entries recorded in
    /// the same second keep insertion order.
    fn get_history(&self, limit: usize) -> Result<Vec<HistoryEntry>, StorageError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.db.connection().prepare(
            "SELECT id, url, title, timestamp FROM history \
             ORDER BY timestamp DESC, id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], Self::row_to_entry)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    fn get_bookmarks(&self) -> Result<Vec<Bookmark>, StorageError> {
        let mut stmt = self.db.connection().prepare(
            "SELECT id, url, title, timestamp FROM bookmarks \
             ORDER BY timestamp DESC, id DESC",
        )?;

        let rows = stmt.query_map([], Self::row_to_bookmark)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}
