//! Rendering-engine collaborator interface.
//!
//! The shell never renders pages itself. Each tab owns one [`WebEngine`]
//! instance; engines report what happens to their page by sending tagged
//! [`EngineEvent`]s through an [`EngineEventSink`]. All sinks feed one channel
//! that the tab session manager drains on the UI thread, so events are handled
//! in arrival order without locking tab state.
//!
//! Pop-ups follow the same path: an engine that needs a new browsing context
//! builds the new engine instance and hands it over in
//! [`EngineEventKind::NewWindowRequested`]. The session manager decides where
//! it goes; engines hold no reference back to it.

pub mod headless;

use log::debug;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Event payloads an engine can raise.
#[derive(Debug)]
pub enum EngineEventKind<E> {
    UrlChanged(String),
    TitleChanged(String),
    /// Load progress in percent, 0 to 100.
    LoadProgress(u8),
    LoadStarted,
    LoadFinished { ok: bool },
    /// The page asked for a new browsing context; the payload is the engine
    /// instance that will render it.
    NewWindowRequested(E),
}

/// An engine event tagged with the tab it originated from.
#[derive(Debug)]
pub struct EngineEvent<E> {
    pub tab_id: String,
    pub kind: EngineEventKind<E>,
}

impl<E> EngineEvent<E> {
    pub fn new(tab_id: impl Into<String>, kind: EngineEventKind<E>) -> Self {
        Self {
            tab_id: tab_id.into(),
            kind,
        }
    }
}

/// Sending half handed to an engine when it is attached to a tab.
pub struct EngineEventSink<E> {
    tab_id: String,
    tx: UnboundedSender<EngineEvent<E>>,
}

impl<E> Clone for EngineEventSink<E> {
    fn clone(&self) -> Self {
        Self {
            tab_id: self.tab_id.clone(),
            tx: self.tx.clone(),
        }
    }
}

impl<E> EngineEventSink<E> {
    pub fn new(tab_id: impl Into<String>, tx: UnboundedSender<EngineEvent<E>>) -> Self {
        Self {
            tab_id: tab_id.into(),
            tx,
        }
    }

    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    /// Queues `kind` for the owning tab. Events sent after the session manager
    /// is gone are dropped.
    pub fn emit(&self, kind: EngineEventKind<E>) {
        let event = EngineEvent {
            tab_id: self.tab_id.clone(),
            kind,
        };
        if self.tx.send(event).is_err() {
            debug!("event for tab {} dropped: receiver closed", self.tab_id);
        }
    }
}

/// Creates the shared event channel.
pub fn event_channel<E>() -> (UnboundedSender<EngineEvent<E>>, UnboundedReceiver<EngineEvent<E>>) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Commands the shell issues to one rendering-engine instance.
pub trait WebEngine: Sized {
    /// Binds the engine to its tab. Engines must not emit before this call.
    fn attach(&mut self, sink: EngineEventSink<Self>);
    fn navigate(&mut self, url: &str);
    fn back(&mut self);
    fn forward(&mut self);
    fn reload(&mut self);
    /// Replaces the page with an inline HTML document.
    fn set_document(&mut self, html: &str);
    /// Extracts the visible text of the page and hands it to `callback`,
    /// possibly later.
    fn extract_plain_text(&self, callback: Box<dyn FnOnce(String)>);
    fn url(&self) -> String;
    fn title(&self) -> String;
}

/// Builds engines for tabs the shell opens on its own.
pub trait EngineFactory {
    type Engine: WebEngine;

    fn create_engine(&mut self) -> Self::Engine;
}
