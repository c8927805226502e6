use serde::Serialize;

use super::chrome::{ChromeView, ProgressIndicator};
use crate::services::navigation::APP_NAME;

/// [`ChromeView`] that keeps the widget state in plain fields.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeadlessChrome {
    pub address_text: String,
    pub window_title: String,
    pub tab_labels: Vec<String>,
    pub current_tab: Option<usize>,
    pub progress: ProgressIndicator,
    pub status_messages: Vec<String>,
}

impl Default for HeadlessChrome {
    fn default() -> Self {
        Self {
            address_text: String::new(),
            window_title: APP_NAME.to_string(),
            tab_labels: Vec::new(),
            current_tab: None,
            progress: ProgressIndicator::Hidden,
            status_messages: Vec::new(),
        }
    }
}

impl HeadlessChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.status_messages.last().map(String::as_str)
    }
}

impl ChromeView for HeadlessChrome {
    fn set_address_text(&mut self, text: &str) {
        self.address_text = text.to_string();
    }

    fn set_window_title(&mut self, title: &str) {
        self.window_title = title.to_string();
    }

    fn insert_tab(&mut self, index: usize, label: &str) {
        let index = index.min(self.tab_labels.len());
        self.tab_labels.insert(index, label.to_string());
    }

    fn remove_tab(&mut self, index: usize) {
        if index < self.tab_labels.len() {
            self.tab_labels.remove(index);
        }
    }

    fn set_tab_label(&mut self, index: usize, label: &str) {
        if let Some(slot) = self.tab_labels.get_mut(index) {
            *slot = label.to_string();
        }
    }

    fn set_current_tab(&mut self, index: usize) {
        self.current_tab = Some(index);
    }

    fn set_progress(&mut self, progress: ProgressIndicator) {
        self.progress = progress;
    }

    fn show_status(&mut self, message: &str, _timeout_ms: u32) {
        self.status_messages.push(message.to_string());
    }
}
