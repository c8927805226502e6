//! The window chrome as seen by the tab session manager.

use serde::{Deserialize, Serialize};

/// How long transient status-bar messages stay visible.
pub const STATUS_TIMEOUT_MS: u32 = 3000;

/// State of the thin progress bar under the toolbar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProgressIndicator {
    #[default]
    Hidden,
    /// Visible at the given percentage.
    Visible(u8),
}

impl ProgressIndicator {
    /// Indicator for a progress report: hidden at 0% and from 100% up.
    pub fn for_progress(percent: u8) -> Self {
        match percent {
            0 | 100..=u8::MAX => ProgressIndicator::Hidden,
            p => ProgressIndicator::Visible(p),
        }
    }
}

/// Widgets the session manager drives. Implemented by the GUI toolkit
/// binding; [`super::headless::HeadlessChrome`] records the calls instead.
pub trait ChromeView {
    fn set_address_text(&mut self, text: &str);
    fn set_window_title(&mut self, title: &str);
    fn insert_tab(&mut self, index: usize, label: &str);
    fn remove_tab(&mut self, index: usize);
    fn set_tab_label(&mut self, index: usize, label: &str);
    fn set_current_tab(&mut self, index: usize);
    fn set_progress(&mut self, progress: ProgressIndicator);
    fn show_status(&mut self, message: &str, timeout_ms: u32);
}
