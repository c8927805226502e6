//! SQLite database connection management for NovaBrowse.
//!
//! Provides the [`Database`] struct that wraps a `rusqlite::Connection`,
//! creates the schema on open and releases the connection on [`Database::close`].

use log::{debug, info};
use rusqlite::Connection;
use std::path::Path;

use super::migrations;
use crate::types::errors::StorageError;

/// Store handle owning the single SQLite connection of the process.
///
/// Opened once at startup and closed at shutdown; every manager reaches the
/// database through this handle rather than opening its own connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) a SQLite database at the given file path and creates
    /// the schema if it is absent.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the connection cannot be established or the
    /// schema cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                // A missing directory surfaces as an open error below.
                let _ = std::fs::create_dir_all(parent);
            }
        }
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.run_migrations()?;
        info!("opened browser database at {}", path.display());
        Ok(db)
    }

    /// Opens an in-memory SQLite database with the full schema.
    ///
    /// The database is discarded when the `Database` is dropped.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.run_migrations()?;
        debug!("opened in-memory browser database");
        Ok(db)
    }

    fn run_migrations(&self) -> Result<(), rusqlite::Error> {
        migrations::run_all(&self.conn)
    }

    /// Returns a reference to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, flushing any pending state to disk.
    pub fn close(self) -> Result<(), StorageError> {
        self.conn
            .close()
            .map_err(|(_, e)| StorageError::Closed(e.to_string()))?;
        info!("closed browser database");
        Ok(())
    }
}
