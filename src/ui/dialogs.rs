//! Content of the history viewer and settings dialog.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::types::history::HistoryEntry;
use crate::types::settings::{BrowserSettings, SearchEngine};

/// One row of the history viewer: title on the first line, URL and time on
/// the second.
pub fn history_line(entry: &HistoryEntry) -> String {
    format!("{}\n{} - {}", entry.title, entry.url, visit_time(entry.timestamp))
}

/// UTC `YYYY-MM-DD HH:MM:SS` for a Unix timestamp; out-of-range values are
/// shown as raw seconds.
pub fn visit_time(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

pub fn history_lines(entries: &[HistoryEntry]) -> Vec<String> {
    entries.iter().map(history_line).collect()
}

/// Values edited in the settings dialog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsForm {
    /// Choices offered by the search engine combo box.
    pub choices: Vec<SearchEngine>,
    pub search_engine: SearchEngine,
    pub homepage: String,
}

impl SettingsForm {
    pub fn from_settings(settings: &BrowserSettings) -> Self {
        Self {
            choices: SearchEngine::ALL.to_vec(),
            search_engine: settings.search_engine,
            homepage: settings.homepage.clone(),
        }
    }

    pub fn to_settings(&self) -> BrowserSettings {
        BrowserSettings {
            search_engine: self.search_engine,
            homepage: self.homepage.trim().to_string(),
        }
    }
}
