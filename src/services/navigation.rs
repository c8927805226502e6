//! Address-bar input resolution and the display rules derived from a URL.

use crate::types::settings::SearchEngine;

/// Sentinel destination for "no document loaded".
pub const BLANK_URL: &str = "about:blank";
/// Prefix of inline documents produced by `set_document`.
pub const DATA_URI_PREFIX: &str = "data:";
/// Schemes that are handed to the engine without rewriting.
pub const KNOWN_SCHEMES: [&str; 4] = ["http://", "https://", "about:", "file://"];
/// Scheme prepended to bare host names.
pub const DEFAULT_SCHEME: &str = "https://";
/// Maximum number of characters shown on a tab label.
pub const TAB_TITLE_WIDTH: usize = 20;
/// Label for tabs whose page has no title.
pub const UNTITLED_TAB_LABEL: &str = "New Tab";
/// Label for tabs adopted from an engine pop-up before their first title.
pub const POPUP_TAB_LABEL: &str = "Loading...";
/// Suffix appended to the window title.
pub const APP_NAME: &str = "NovaBrowse";

/// Resolves free text typed into the address bar into a destination URL.
///
/// Text with whitespace is a search query. Text starting with a known scheme
/// passes through. Text without a `.` is a search query. Anything else gets
/// [`DEFAULT_SCHEME`] prepended. Returns `None` for blank input.
pub fn resolve_input(input: &str, engine: SearchEngine) -> Option<String> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }

    if text.chars().any(char::is_whitespace) {
        return Some(engine.query_url(text));
    }
    if has_known_scheme(text) {
        return Some(text.to_string());
    }
    if !text.contains('.') {
        return Some(engine.query_url(text));
    }
    Some(format!("{}{}", DEFAULT_SCHEME, text))
}

pub fn has_known_scheme(text: &str) -> bool {
    KNOWN_SCHEMES.iter().any(|scheme| text.starts_with(scheme))
}

/// True for the blank marker and inline data documents.
pub fn is_internal_url(url: &str) -> bool {
    url == BLANK_URL || url.starts_with(DATA_URI_PREFIX)
}

/// Text the address bar shows for `url`: empty for internal pages.
pub fn address_bar_text(url: &str) -> &str {
    if is_internal_url(url) {
        ""
    } else {
        url
    }
}

/// Whether a finished load of `url` belongs in the history log.
pub fn should_record_history(url: &str) -> bool {
    !url.is_empty() && !is_internal_url(url)
}

/// Tab-strip label for a page title: at most [`TAB_TITLE_WIDTH`] characters,
/// or [`UNTITLED_TAB_LABEL`] when the title is empty.
pub fn tab_label(title: &str) -> String {
    let label: String = title.chars().take(TAB_TITLE_WIDTH).collect();
    if label.is_empty() {
        UNTITLED_TAB_LABEL.to_string()
    } else {
        label
    }
}

pub fn window_title(title: &str) -> String {
    if title.is_empty() {
        APP_NAME.to_string()
    } else {
        format!("{} - {}", title, APP_NAME)
    }
}
