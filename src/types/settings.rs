use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Settings key holding the selected search engine name.
pub const SEARCH_ENGINE_KEY: &str = "search_engine";
/// Settings key holding the homepage URL, or [`INTERNAL_HOMEPAGE`].
pub const HOMEPAGE_KEY: &str = "homepage";
/// Homepage value meaning "use the built-in home document".
pub const INTERNAL_HOMEPAGE: &str = "Internal";

/// Search engines offered in the settings dialog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SearchEngine {
    #[default]
    Google,
    DuckDuckGo,
    Bing,
}

impl SearchEngine {
    /// All selectable engines, in the order the settings dialog lists them.
    pub const ALL: [SearchEngine; 3] = [
        SearchEngine::Google,
        SearchEngine::DuckDuckGo,
        SearchEngine::Bing,
    ];

    /// Name stored in the `search_engine` setting.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchEngine::Google => "Google",
            SearchEngine::DuckDuckGo => "DuckDuckGo",
            SearchEngine::Bing => "Bing",
        }
    }

    /// Builds the query URL for `query`. The text is passed through as typed;
    /// percent-encoding is left to the rendering engine.
    pub fn query_url(&self, query: &str) -> String {
        let base = match self {
            SearchEngine::Google => "https://www.google.com/search?q=",
            SearchEngine::DuckDuckGo => "https://duckduckgo.com/?q=",
            SearchEngine::Bing => "https://www.bing.com/search?q=",
        };
        format!("{}{}", base, query)
    }

    /// Parses a stored setting value, falling back to the default engine for
    /// anything unrecognized.
    pub fn from_setting(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchEngine::ALL
            .iter()
            .find(|engine| engine.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown search engine: {}", s))
    }
}

/// Typed view of the user settings kept in the `settings` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserSettings {
    pub search_engine: SearchEngine,
    pub homepage: String,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            search_engine: SearchEngine::Google,
            homepage: INTERNAL_HOMEPAGE.to_string(),
        }
    }
}

impl BrowserSettings {
    /// Returns true when the homepage points at the built-in home document.
    pub fn uses_internal_homepage(&self) -> bool {
        let home = self.homepage.trim();
        home.is_empty() || home.eq_ignore_ascii_case(INTERNAL_HOMEPAGE)
    }
}
