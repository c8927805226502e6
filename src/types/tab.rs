use serde::{Deserialize, Serialize};

/// Lifecycle of a tab session.
///
/// `Created → Loading → Loaded`, re-entering `Loading` on every navigation.
/// `Closed` is terminal and only observed on sessions handed back by
/// `close_tab`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TabState {
    Created,
    Loading,
    Loaded,
    Closed,
}

/// One open tab: an engine instance plus the state the chrome shows for it.
#[derive(Debug)]
pub struct TabSession<E> {
    pub id: String,
    pub engine: E,
    /// Label shown on the tab strip, already truncated.
    pub display_title: String,
    /// Full page title as last reported by the engine.
    pub title: String,
    pub current_url: String,
    pub state: TabState,
    /// Last load progress reported by the engine, 0 to 100.
    pub progress: u8,
}

/// Serializable snapshot of a tab, used by the command surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabSummary {
    pub id: String,
    pub title: String,
    pub display_title: String,
    pub url: String,
    pub state: TabState,
    pub active: bool,
}

impl<E> TabSession<E> {
    pub fn summary(&self, active: bool) -> TabSummary {
        TabSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            display_title: self.display_title.clone(),
            url: self.current_url.clone(),
            state: self.state,
            active,
        }
    }
}
