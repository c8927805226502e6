//! Unit tests for the NovaBrowse database layer (connection + schema).

use novabrowse::database::migrations::{self, TABLES};
use novabrowse::database::Database;
use rusqlite::Connection;

fn table_exists(conn: &Connection, table: &str) -> bool {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
        [table],
        |row| row.get(0),
    )
    .unwrap_or(false)
}

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_schema_creates_all_tables() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    for table in &TABLES {
        assert!(
            table_exists(db.connection(), table),
            "Table '{}' should exist after opening",
            table
        );
    }
}

#[test]
fn test_no_version_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert!(!table_exists(db.connection(), "schema_version"));
}

#[test]
fn test_schema_creation_is_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    db.connection()
        .execute("INSERT INTO settings (key, value) VALUES ('homepage', 'x')", [])
        .unwrap();

    migrations::run_all(db.connection()).expect("second run should succeed");

    let value: String = db
        .connection()
        .query_row("SELECT value FROM settings WHERE key = 'homepage'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(value, "x");
}

#[test]
fn test_history_timestamp_defaults_to_now() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    db.connection()
        .execute("INSERT INTO history (url) VALUES ('https://a.com')", [])
        .unwrap();
    let (title, ts): (String, i64) = db
        .connection()
        .query_row("SELECT title, timestamp FROM history", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(title, "");
    assert!(ts > 0);
}

#[test]
fn test_file_database_creates_parent_dirs_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("browser_data.db");

    let db = Database::open(&path).expect("open should create the file");
    db.connection()
        .execute("INSERT INTO bookmarks (url, title) VALUES ('https://a.com', 'A')", [])
        .unwrap();
    db.close().expect("close should succeed");
    assert!(path.exists());

    let db = Database::open(&path).expect("reopen should succeed");
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_file_database_uses_wal() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("wal.db")).unwrap();
    let mode: String = db
        .connection()
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");
}
