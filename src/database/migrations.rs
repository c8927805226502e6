//! Schema creation for the NovaBrowse SQLite database.
//!
//! There is no version table: every statement is `IF NOT EXISTS`, so the
//! schema is created on first use and left untouched afterwards.

use rusqlite::Connection;

/// Tables the shell expects to exist after [`run_all`].
pub const TABLES: [&str; 3] = ["settings", "history", "bookmarks"];

/// Creates the settings, history and bookmarks tables if they are absent.
///
/// # Errors
/// Returns `rusqlite::Error` if any SQL statement fails.
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    // In-memory databases ignore WAL and report "memory"; the returned mode is not checked.
    let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    conn.execute_batch("PRAGMA synchronous = FULL;")?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url TEXT NOT NULL,
            title TEXT NOT NULL DEFAULT '',
            timestamp INTEGER NOT NULL DEFAULT (CAST(strftime('%s', 'now') AS INTEGER))
        );

        CREATE INDEX IF NOT EXISTS idx_history_timestamp ON history(timestamp);

        CREATE TABLE IF NOT EXISTS bookmarks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url TEXT NOT NULL,
            title TEXT NOT NULL DEFAULT '',
            timestamp INTEGER NOT NULL DEFAULT (CAST(strftime('%s', 'now') AS INTEGER))
        );
        ",
    )
}
