//! App Core for NovaBrowse.
//!
//! Owns the store handle and the tab sessions of the window, and runs the
//! startup and shutdown sequences.

use std::sync::Arc;

use log::{info, warn};

use crate::database::connection::Database;
use crate::engine::EngineFactory;
use crate::managers::storage_manager::StorageManager;
use crate::managers::tab_session_manager::{TabSessionManager, TabSessionManagerTrait};
use crate::services::home_page::HomePage;
use crate::services::shell_config::ShellConfig;
use crate::types::errors::StorageError;
use crate::ui::chrome::ChromeView;

/// Central application struct.
///
/// The database is opened here once and shared with the managers through an
/// `Arc`; [`App::shutdown`] releases it.
pub struct App<F: EngineFactory, C: ChromeView> {
    pub db: Arc<Database>,
    pub config: ShellConfig,
    pub sessions: TabSessionManager<StorageManager, F, C>,
}

impl<F: EngineFactory, C: ChromeView> App<F, C> {
    /// Opens the database named by `config` and builds the managers.
    pub fn new(config: ShellConfig, factory: F, chrome: C) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(config.database_path())?;
        Ok(Self::with_database(db, config, factory, chrome))
    }

    /// Builds the app around an already opened database.
    pub fn with_database(db: Database, config: ShellConfig, factory: F, chrome: C) -> Self {
        let db = Arc::new(db);
        let home_page = match &config.homepage_path {
            Some(path) => HomePage::from_path(path),
            None => HomePage::bundled(),
        };
        let sessions = TabSessionManager::new(
            StorageManager::new(db.clone()),
            factory,
            chrome,
            home_page,
        );
        Self {
            db,
            config,
            sessions,
        }
    }

    /// Opens the first tab on the home destination and settles its events.
    pub fn startup(&mut self) {
        if self.sessions.tab_count() == 0 {
            self.sessions.open_tab(None);
        }
        self.sessions.pump_events();
        info!("startup complete");
    }

    /// Drops the tabs and closes the database.
    pub fn shutdown(self) -> Result<(), StorageError> {
        let App { db, sessions, .. } = self;
        drop(sessions);
        match Arc::try_unwrap(db) {
            Ok(db) => db.close(),
            Err(_) => {
                warn!("database still shared at shutdown; leaving it to drop");
                Ok(())
            }
        }
    }
}
