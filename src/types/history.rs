use serde::{Deserialize, Serialize};

/// A single completed page load, as recorded in the history log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: i64,
    pub url: String,
    pub title: String,
    /// UNIX timestamp in seconds.
    pub timestamp: i64,
}
