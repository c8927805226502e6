//! Tab Session Manager for NovaBrowse.
//!
//! Owns the open tabs and the active-tab pointer, turns UI actions into engine
//! commands, and routes engine events back to the chrome and the store.
//!
//! Invariant: once the first tab is open there is always at least one tab.
//! Closing the last one sends it back to the home destination instead.

use log::{debug, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::engine::{event_channel, EngineEvent, EngineEventKind, EngineEventSink, EngineFactory, WebEngine};
use crate::managers::storage_manager::StorageManagerTrait;
use crate::services::home_page::HomePage;
use crate::services::navigation::{
    address_bar_text, resolve_input, should_record_history, tab_label, window_title, BLANK_URL,
    POPUP_TAB_LABEL, UNTITLED_TAB_LABEL,
};
use crate::types::bookmark::Bookmark;
use crate::types::errors::{StorageError, TabError};
use crate::types::history::HistoryEntry;
use crate::types::tab::{TabSession, TabState, TabSummary};
use crate::ui::chrome::{ChromeView, ProgressIndicator, STATUS_TIMEOUT_MS};
use crate::ui::dialogs::SettingsForm;

/// Result of [`TabSessionManagerTrait::close_tab`].
#[derive(Debug)]
pub enum CloseOutcome<E> {
    /// The tab was removed; its session (now `Closed`) is handed back so the
    /// caller can tear the engine down.
    Closed(TabSession<E>),
    /// It was the only tab, so it was sent back to the home destination.
    ResetToHome,
}

/// Trait defining the tab session interface.
pub trait TabSessionManagerTrait {
    type Engine: WebEngine;

    fn open_tab(&mut self, url: Option<&str>) -> String;
    fn open_tab_from_engine_request(&mut self, engine: Self::Engine) -> String;
    fn close_tab(&mut self, index: usize) -> Result<CloseOutcome<Self::Engine>, TabError>;
    fn set_active_tab(&mut self, index: usize) -> Result<(), TabError>;
    fn navigate(&mut self, input: &str) -> Option<String>;
    fn on_engine_event(&mut self, event: EngineEvent<Self::Engine>);
    fn pump_events(&mut self) -> usize;
    fn tab_count(&self) -> usize;
    fn active_index(&self) -> Option<usize>;
}

/// Tab sessions of one browser window.
pub struct TabSessionManager<S, F: EngineFactory, C> {
    tabs: Vec<TabSession<F::Engine>>,
    active: Option<usize>,
    storage: S,
    factory: F,
    chrome: C,
    home_page: HomePage,
    events_tx: UnboundedSender<EngineEvent<F::Engine>>,
    events_rx: UnboundedReceiver<EngineEvent<F::Engine>>,
}

impl<S, F, C> TabSessionManager<S, F, C>
where
    S: StorageManagerTrait,
    F: EngineFactory,
    C: ChromeView,
{
    /// Creates a manager with no tabs. Call `open_tab(None)` to show the
    /// first one.
    pub fn new(storage: S, factory: F, chrome: C, home_page: HomePage) -> Self {
        let (events_tx, events_rx) = event_channel();
        Self {
            tabs: Vec::new(),
            active: None,
            storage,
            factory,
            chrome,
            home_page,
            events_tx,
            events_rx,
        }
    }

    pub fn tabs(&self) -> &[TabSession<F::Engine>] {
        &self.tabs
    }

    pub fn tab(&self, index: usize) -> Option<&TabSession<F::Engine>> {
        self.tabs.get(index)
    }

    pub fn active_tab(&self) -> Option<&TabSession<F::Engine>> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut TabSession<F::Engine>> {
        self.active.and_then(|i| self.tabs.get_mut(i))
    }

    pub fn index_of(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    /// Activates the tab with the given ID.
    pub fn activate_by_id(&mut self, tab_id: &str) -> Result<(), TabError> {
        let index = self
            .index_of(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;
        self.set_active_tab(index)
    }

    pub fn tab_summaries(&self) -> Vec<TabSummary> {
        self.tabs
            .iter()
            .enumerate()
            .map(|(i, t)| t.summary(self.active == Some(i)))
            .collect()
    }

    pub fn chrome(&self) -> &C {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut C {
        &mut self.chrome
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Sender feeding the routing queue, for engines living outside the
    /// manager (for example a toolkit binding emitting from callbacks).
    pub fn event_sender(&self) -> UnboundedSender<EngineEvent<F::Engine>> {
        self.events_tx.clone()
    }

    pub fn back(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.engine.back();
        }
    }

    pub fn forward(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.engine.forward();
        }
    }

    pub fn reload(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.state = TabState::Loading;
            tab.engine.reload();
        }
    }

    /// Loads the home destination in the active tab.
    pub fn navigate_home(&mut self) {
        if let Some(index) = self.active {
            self.load_home(index);
        }
    }

    /// Double-click on the tab strip. Empty space (`None`) opens a new tab.
    pub fn on_tab_bar_double_click(&mut self, index: Option<usize>) -> Option<String> {
        match index {
            None => Some(self.open_tab(None)),
            Some(_) => None,
        }
    }

    /// Bookmarks the active page and reports it in the status bar.
    pub fn add_bookmark(&mut self) -> Result<Option<i64>, StorageError> {
        let Some(tab) = self.active_tab() else {
            return Ok(None);
        };
        let url = tab.engine.url();
        let title = tab.engine.title();
        let id = self.storage.add_bookmark(&url, &title)?;
        self.chrome
            .show_status(&format!("Bookmarked: {}", title), STATUS_TIMEOUT_MS);
        info!("bookmarked {}", url);
        Ok(Some(id))
    }

    pub fn history(&self, limit: usize) -> Result<Vec<HistoryEntry>, StorageError> {
        self.storage.get_history(limit)
    }

    pub fn bookmarks(&self) -> Result<Vec<Bookmark>, StorageError> {
        self.storage.get_bookmarks()
    }

    /// Current values for the settings dialog.
    pub fn settings_form(&self) -> SettingsForm {
        SettingsForm::from_settings(&self.storage.load_settings())
    }

    /// Persists the settings dialog and confirms in the status bar.
    pub fn save_settings(&mut self, form: &SettingsForm) -> Result<(), StorageError> {
        self.storage.save_settings(&form.to_settings())?;
        self.chrome
            .show_status("Settings saved successfully", STATUS_TIMEOUT_MS);
        Ok(())
    }

    /// Asks the active engine for the page text.
    pub fn active_page_text(&self, callback: Box<dyn FnOnce(String)>) {
        match self.active_tab() {
            Some(tab) => tab.engine.extract_plain_text(callback),
            None => callback(String::new()),
        }
    }

    /// Attaches `engine` to a fresh session, shows it and makes it active.
    fn adopt(&mut self, mut engine: F::Engine, label: &str) -> (usize, String) {
        let id = Uuid::new_v4().to_string();
        engine.attach(EngineEventSink::new(id.clone(), self.events_tx.clone()));
        let index = self.tabs.len();
        self.tabs.push(TabSession {
            id: id.clone(),
            engine,
            display_title: label.to_string(),
            title: String::new(),
            current_url: BLANK_URL.to_string(),
            state: TabState::Created,
            progress: 0,
        });
        self.chrome.insert_tab(index, label);
        self.activate(index);
        (index, id)
    }

    /// Makes `index` active and syncs the chrome. `index` must be in range.
    fn activate(&mut self, index: usize) {
        let tab = &self.tabs[index];
        self.active = Some(index);

        self.chrome.set_current_tab(index);
        self.chrome.set_address_text(address_bar_text(&tab.current_url));
        self.chrome.set_window_title(&window_title(&tab.title));
        let progress = if tab.state == TabState::Loading && tab.progress < 100 {
            ProgressIndicator::Visible(tab.progress)
        } else {
            ProgressIndicator::Hidden
        };
        self.chrome.set_progress(progress);
    }

    fn load_url(&mut self, index: usize, url: &str) {
        if let Some(tab) = self.tabs.get_mut(index) {
            debug!("tab {} navigating to {}", tab.id, url);
            tab.state = TabState::Loading;
            tab.engine.navigate(url);
        }
    }

    /// Loads the configured homepage, or the built-in home document.
    fn load_home(&mut self, index: usize) {
        let settings = self.storage.load_settings();
        if !settings.uses_internal_homepage() {
            if let Some(url) = resolve_input(&settings.homepage, settings.search_engine) {
                self.load_url(index, &url);
                return;
            }
        }

        let html = self.home_page.html();
        if let Some(tab) = self.tabs.get_mut(index) {
            debug!("tab {} loading home document", tab.id);
            tab.state = TabState::Loading;
            tab.engine.set_document(&html);
        }
    }

    fn route_tab_event(&mut self, index: usize, kind: EngineEventKind<F::Engine>) {
        let is_active = self.active == Some(index);
        let tab = &mut self.tabs[index];

        match kind {
            EngineEventKind::UrlChanged(url) => {
                if is_active {
                    self.chrome.set_address_text(address_bar_text(&url));
                }
                tab.current_url = url;
            }
            EngineEventKind::TitleChanged(title) => {
                tab.display_title = tab_label(&title);
                self.chrome.set_tab_label(index, &tab.display_title);
                if is_active {
                    self.chrome.set_window_title(&window_title(&title));
                }
                tab.title = title;
            }
            EngineEventKind::LoadProgress(percent) => {
                tab.progress = percent.min(100);
                if is_active {
                    self.chrome
                        .set_progress(ProgressIndicator::for_progress(percent));
                }
            }
            EngineEventKind::LoadStarted => {
                tab.state = TabState::Loading;
                tab.progress = 0;
                if is_active {
                    self.chrome.set_progress(ProgressIndicator::Visible(0));
                }
            }
            EngineEventKind::LoadFinished { ok } => {
                tab.state = TabState::Loaded;
                tab.progress = 100;
                if is_active {
                    self.chrome.set_progress(ProgressIndicator::Hidden);
                }
                // Routed state, not the engine's: later loads may already be queued.
                if ok && should_record_history(&tab.current_url) {
                    if let Err(e) = self.storage.add_history_item(&tab.current_url, &tab.title) {
                        warn!("history entry for {} not recorded: {}", tab.current_url, e);
                    }
                }
            }
            EngineEventKind::NewWindowRequested(_) => {}
        }
    }
}

impl<S, F, C> TabSessionManagerTrait for TabSessionManager<S, F, C>
where
    S: StorageManagerTrait,
    F: EngineFactory,
    C: ChromeView,
{
    type Engine = F::Engine;

    /// Opens a tab and makes it active. No URL (or the blank marker) loads
    /// the home destination. Returns the new tab's ID.
    fn open_tab(&mut self, url: Option<&str>) -> String {
        let engine = self.factory.create_engine();
        let (index, id) = self.adopt(engine, UNTITLED_TAB_LABEL);

        match url.map(str::trim).filter(|u| !u.is_empty() && *u != BLANK_URL) {
            Some(url) => self.load_url(index, url),
            None => self.load_home(index),
        }
        info!("opened tab {} at index {}", id, index);
        id
    }

    /// Wraps an engine-initiated browsing context into a new active tab.
    fn open_tab_from_engine_request(&mut self, engine: F::Engine) -> String {
        let (index, id) = self.adopt(engine, POPUP_TAB_LABEL);
        info!("adopted pop-up as tab {} at index {}", id, index);
        id
    }

    /// Removes the tab at `index`, or resets it home when it is the last one.
    fn close_tab(&mut self, index: usize) -> Result<CloseOutcome<F::Engine>, TabError> {
        if index >= self.tabs.len() {
            return Err(TabError::InvalidIndex(index));
        }

        if self.tabs.len() < 2 {
            info!("last tab closed, returning it home");
            self.load_home(index);
            return Ok(CloseOutcome::ResetToHome);
        }

        let mut session = self.tabs.remove(index);
        session.state = TabState::Closed;
        self.chrome.remove_tab(index);

        match self.active {
            Some(active) if active == index => {
                let next = index.min(self.tabs.len() - 1);
                self.active = None;
                self.set_active_tab(next)?;
            }
            Some(active) if active > index => {
                self.active = Some(active - 1);
                self.chrome.set_current_tab(active - 1);
            }
            _ => {}
        }

        info!("closed tab {}", session.id);
        Ok(CloseOutcome::Closed(session))
    }

    /// Makes `index` the active tab and syncs the chrome with it.
    fn set_active_tab(&mut self, index: usize) -> Result<(), TabError> {
        if index >= self.tabs.len() {
            return Err(TabError::InvalidIndex(index));
        }
        self.activate(index);
        Ok(())
    }

    /// Resolves address-bar text and loads it in the active tab. Returns the
    /// destination, or `None` when the input is blank or no tab is open.
    fn navigate(&mut self, input: &str) -> Option<String> {
        let index = self.active?;
        let settings = self.storage.load_settings();
        let url = resolve_input(input, settings.search_engine)?;
        self.load_url(index, &url);
        Some(url)
    }

    /// Routes one engine event to the tab it is tagged with.
    fn on_engine_event(&mut self, event: EngineEvent<F::Engine>) {
        let EngineEvent { tab_id, kind } = event;

        let kind = match kind {
            EngineEventKind::NewWindowRequested(engine) => {
                debug!("tab {} requested a new window", tab_id);
                self.open_tab_from_engine_request(engine);
                return;
            }
            other => other,
        };

        match self.index_of(&tab_id) {
            Some(index) => self.route_tab_event(index, kind),
            None => debug!("event for closed tab {} ignored", tab_id),
        }
    }

    /// Handles every queued engine event, including those raised while
    /// handling. Returns how many were handled.
    fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.on_engine_event(event);
            handled += 1;
        }
        handled
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn active_index(&self) -> Option<usize> {
        self.active
    }
}
