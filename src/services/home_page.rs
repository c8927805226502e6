// NovaBrowse home page loader
// Serves the home document compiled into the binary, or one read from disk
// that degrades to an inline page.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

/// Served when a configured home document cannot be read.
pub const FALLBACK_HOME_HTML: &str = "<h1>NovaBrowse</h1><p>Home page missing.</p>";

/// Home document compiled into the binary.
pub const BUNDLED_HOME_HTML: &str = include_str!("../../resources/homepage.html");

#[derive(Debug, Clone, Default)]
enum HomeSource {
    #[default]
    Bundled,
    File(PathBuf),
    Inline,
}

/// Source of the built-in home document.
#[derive(Debug, Clone, Default)]
pub struct HomePage {
    source: HomeSource,
}

impl HomePage {
    /// Home page read from `path` on every load.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: HomeSource::File(path.as_ref().to_path_buf()),
        }
    }

    /// Home page shipped inside the binary.
    pub fn bundled() -> Self {
        Self {
            source: HomeSource::Bundled,
        }
    }

    /// Home page that always serves the inline placeholder.
    pub fn inline() -> Self {
        Self {
            source: HomeSource::Inline,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            HomeSource::File(path) => Some(path),
            _ => None,
        }
    }

    /// Returns the home document HTML. Never fails: a missing or unreadable
    /// file yields [`FALLBACK_HOME_HTML`].
    pub fn html(&self) -> String {
        let path = match &self.source {
            HomeSource::Bundled => return BUNDLED_HOME_HTML.to_string(),
            HomeSource::Inline => return FALLBACK_HOME_HTML.to_string(),
            HomeSource::File(path) => path,
        };
        match fs::read_to_string(path) {
            Ok(html) => html,
            Err(e) => {
                warn!("home page {} unavailable ({}), using placeholder", path.display(), e);
                FALLBACK_HOME_HTML.to_string()
            }
        }
    }
}
