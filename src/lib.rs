//! NovaBrowse: a minimal tabbed web-browser shell.
//!
//! The rendering engine and the GUI toolkit are collaborators behind the
//! [`engine::WebEngine`] and [`ui::chrome::ChromeView`] traits. This crate
//! holds the parts with state: the SQLite-backed store for history, bookmarks
//! and settings, and the tab session manager that routes engine events.

pub mod app;
pub mod command_handler;
pub mod database;
pub mod engine;
pub mod logging;
pub mod managers;
pub mod services;
pub mod types;
pub mod ui;
