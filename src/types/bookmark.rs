use serde::{Deserialize, Serialize};

/// Represents a saved bookmark. Bookmarks are never edited once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub timestamp: i64,
}
