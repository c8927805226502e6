//! NovaBrowse database layer.
//!
//! Provides SQLite connection management and idempotent schema creation.
//!
//! # Usage
//!
//! ```no_run
//! use novabrowse::database::Database;
//!
//! // Open a persistent database
//! let db = Database::open("browser_data.db").expect("failed to open database");
//! db.close().expect("failed to close database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
