// NovaBrowse state managers
// Managers handle stateful operations: persisted browser data and open tab sessions.

pub mod storage_manager;
pub mod tab_session_manager;
