//! In-memory engine used by the command-line shell and the tests.
//!
//! It does not fetch anything: a navigation immediately walks through the
//! event sequence a real engine would produce, with the host name as the page
//! title.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use log::debug;

use super::{EngineEventKind, EngineEventSink, EngineFactory, WebEngine};
use crate::services::navigation::BLANK_URL;

#[derive(Debug, Clone, PartialEq)]
struct Page {
    url: String,
    title: String,
    html: Option<String>,
}

impl Page {
    fn blank() -> Self {
        Self {
            url: BLANK_URL.to_string(),
            title: String::new(),
            html: None,
        }
    }

    fn from_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title_for_url(url),
            html: None,
        }
    }

    fn from_document(html: &str) -> Self {
        Self {
            url: format!("data:text/html;charset=UTF-8;base64,{}", BASE64.encode(html)),
            title: document_title(html),
            html: Some(html.to_string()),
        }
    }
}

/// Scripted [`WebEngine`] with back/forward stacks.
pub struct HeadlessEngine {
    sink: Option<EngineEventSink<HeadlessEngine>>,
    current: Page,
    back_stack: Vec<Page>,
    forward_stack: Vec<Page>,
    /// Load requested before the engine was attached to a tab.
    pending: Option<Page>,
    /// Load waiting for `complete_load`.
    held: Option<Page>,
    hold_loads: bool,
}

impl std::fmt::Debug for HeadlessEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessEngine")
            .field("url", &self.current.url)
            .field("title", &self.current.title)
            .field("attached", &self.sink.is_some())
            .finish()
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self {
            sink: None,
            current: Page::blank(),
            back_stack: Vec::new(),
            forward_stack: Vec::new(),
            pending: None,
            held: None,
            hold_loads: false,
        }
    }

    /// When enabled, loads stop after their first progress report until
    /// [`HeadlessEngine::complete_load`] is called.
    pub fn set_hold_loads(&mut self, hold: bool) {
        self.hold_loads = hold;
    }

    /// Finishes a load started while loads were held. Returns false when
    /// nothing was in flight.
    pub fn complete_load(&mut self) -> bool {
        match self.held.take() {
            Some(page) => {
                self.finish(&page);
                true
            }
            None => false,
        }
    }

    /// Simulates a page asking for a new browsing context (for example a link
    /// with `target="_blank"`). The new engine loads `url` once attached.
    pub fn open_popup(&mut self, url: &str) {
        let mut popup = HeadlessEngine::new();
        popup.pending = Some(Page::from_url(url));
        popup.hold_loads = self.hold_loads;
        match &self.sink {
            Some(sink) => sink.emit(EngineEventKind::NewWindowRequested(popup)),
            None => debug!("popup for {} dropped: engine not attached", url),
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }

    /// Moves to `page`, pushing the current page onto the back stack.
    fn visit(&mut self, page: Page) {
        if self.sink.is_none() {
            self.pending = Some(page);
            return;
        }
        let previous = std::mem::replace(&mut self.current, Page::blank());
        if previous != Page::blank() {
            self.back_stack.push(previous);
        }
        self.forward_stack.clear();
        self.load(page);
    }

    fn load(&mut self, page: Page) {
        self.current = page.clone();
        self.held = None;
        let Some(sink) = &self.sink else {
            return;
        };
        sink.emit(EngineEventKind::LoadStarted);
        sink.emit(EngineEventKind::UrlChanged(page.url.clone()));
        sink.emit(EngineEventKind::LoadProgress(10));
        if self.hold_loads {
            self.held = Some(page);
        } else {
            self.finish(&page);
        }
    }

    fn finish(&self, page: &Page) {
        if let Some(sink) = &self.sink {
            sink.emit(EngineEventKind::TitleChanged(page.title.clone()));
            sink.emit(EngineEventKind::LoadProgress(100));
            sink.emit(EngineEventKind::LoadFinished { ok: true });
        }
    }
}

impl WebEngine for HeadlessEngine {
    fn attach(&mut self, sink: EngineEventSink<Self>) {
        debug!("headless engine attached to tab {}", sink.tab_id());
        self.sink = Some(sink);
        if let Some(page) = self.pending.take() {
            self.visit(page);
        }
    }

    fn navigate(&mut self, url: &str) {
        self.visit(Page::from_url(url));
    }

    fn back(&mut self) {
        if let Some(page) = self.back_stack.pop() {
            let current = std::mem::replace(&mut self.current, Page::blank());
            self.forward_stack.push(current);
            self.load(page);
        }
    }

    fn forward(&mut self) {
        if let Some(page) = self.forward_stack.pop() {
            let current = std::mem::replace(&mut self.current, Page::blank());
            self.back_stack.push(current);
            self.load(page);
        }
    }

    fn reload(&mut self) {
        let page = self.current.clone();
        self.load(page);
    }

    fn set_document(&mut self, html: &str) {
        self.visit(Page::from_document(html));
    }

    fn extract_plain_text(&self, callback: Box<dyn FnOnce(String)>) {
        let text = match &self.current.html {
            Some(html) => strip_tags(html),
            None => self.current.title.clone(),
        };
        callback(text);
    }

    fn url(&self) -> String {
        self.current.url.clone()
    }

    fn title(&self) -> String {
        self.current.title.clone()
    }
}

/// Factory producing fresh [`HeadlessEngine`]s.
#[derive(Debug, Default)]
pub struct HeadlessEngineFactory {
    hold_loads: bool,
}

impl HeadlessEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engines created afterwards hold their loads; see
    /// [`HeadlessEngine::set_hold_loads`].
    pub fn holding_loads() -> Self {
        Self { hold_loads: true }
    }
}

impl EngineFactory for HeadlessEngineFactory {
    type Engine = HeadlessEngine;

    fn create_engine(&mut self) -> HeadlessEngine {
        let mut engine = HeadlessEngine::new();
        engine.set_hold_loads(self.hold_loads);
        engine
    }
}

/// Host part of a URL, used as the page title.
fn title_for_url(url: &str) -> String {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    rest.split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Contents of the first `<title>` element, or an empty string.
fn document_title(html: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let Some(start) = lower.find("<title>") else {
        return String::new();
    };
    let start = start + "<title>".len();
    match lower[start..].find("</title>") {
        Some(len) => html[start..start + len].trim().to_string(),
        None => String::new(),
    }
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
