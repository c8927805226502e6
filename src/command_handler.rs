//! JSON command dispatch for the NovaBrowse shell.
//!
//! Each command is one JSON object with a `cmd` field, as sent by the
//! toolbar, tab strip and dialogs. `handle_command` applies it to the app,
//! settles the engine events it caused and returns a JSON result.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::app::App;
use crate::engine::EngineFactory;
use crate::managers::tab_session_manager::{CloseOutcome, TabSessionManagerTrait};
use crate::types::errors::CommandError;
use crate::types::settings::SearchEngine;
use crate::ui::chrome::ChromeView;
use crate::ui::dialogs::{history_lines, SettingsForm};

/// Commands understood by [`handle_command`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ShellCommand {
    Navigate { input: String },
    Back,
    Forward,
    Reload,
    Home,
    NewTab {
        #[serde(default)]
        url: Option<String>,
    },
    CloseTab { index: usize },
    SwitchTab { index: usize },
    Bookmark,
    History {
        #[serde(default)]
        limit: Option<usize>,
    },
    Bookmarks,
    GetSettings,
    SaveSettings { search_engine: String, homepage: String },
    PageText,
    State,
    Quit,
}

const COMMAND_NAMES: [&str; 16] = [
    "navigate",
    "back",
    "forward",
    "reload",
    "home",
    "new_tab",
    "close_tab",
    "switch_tab",
    "bookmark",
    "history",
    "bookmarks",
    "get_settings",
    "save_settings",
    "page_text",
    "state",
    "quit",
];

/// Decodes one command line.
pub fn parse_command(line: &str) -> Result<ShellCommand, CommandError> {
    let value: Value =
        serde_json::from_str(line).map_err(|e| CommandError::Parse(e.to_string()))?;
    let name = value
        .get("cmd")
        .and_then(Value::as_str)
        .ok_or_else(|| CommandError::Parse("missing cmd".to_string()))?;
    if !COMMAND_NAMES.contains(&name) {
        return Err(CommandError::UnknownCommand(name.to_string()));
    }
    serde_json::from_value(value).map_err(|e| CommandError::Parse(e.to_string()))
}

/// Applies `command` to the app and returns its JSON result.
pub fn handle_command<F, C>(app: &mut App<F, C>, command: ShellCommand) -> Result<Value, CommandError>
where
    F: EngineFactory,
    C: ChromeView + Serialize,
{
    debug!("command {:?}", command);
    let sessions = &mut app.sessions;

    let result = match command {
        ShellCommand::Navigate { input } => match sessions.navigate(&input) {
            Some(url) => json!({ "url": url }),
            None => json!({ "url": null }),
        },
        ShellCommand::Back => {
            sessions.back();
            json!({ "ok": true })
        }
        ShellCommand::Forward => {
            sessions.forward();
            json!({ "ok": true })
        }
        ShellCommand::Reload => {
            sessions.reload();
            json!({ "ok": true })
        }
        ShellCommand::Home => {
            sessions.navigate_home();
            json!({ "ok": true })
        }
        ShellCommand::NewTab { url } => {
            let id = sessions.open_tab(url.as_deref());
            json!({ "id": id })
        }
        ShellCommand::CloseTab { index } => match sessions.close_tab(index)? {
            CloseOutcome::Closed(session) => json!({ "closed": session.id }),
            CloseOutcome::ResetToHome => json!({ "reset": true }),
        },
        ShellCommand::SwitchTab { index } => {
            sessions.set_active_tab(index)?;
            json!({ "active": index })
        }
        ShellCommand::Bookmark => {
            let id = sessions.add_bookmark()?;
            json!({ "id": id })
        }
        ShellCommand::History { limit } => {
            let limit = limit.unwrap_or(app.config.history_limit);
            let entries = sessions.history(limit)?;
            json!({ "entries": entries, "lines": history_lines(&entries) })
        }
        ShellCommand::Bookmarks => {
            let bookmarks = sessions.bookmarks()?;
            json!({ "bookmarks": bookmarks })
        }
        ShellCommand::GetSettings => json!(sessions.settings_form()),
        ShellCommand::SaveSettings {
            search_engine,
            homepage,
        } => {
            let search_engine: SearchEngine = search_engine
                .parse()
                .map_err(CommandError::InvalidArgument)?;
            let form = SettingsForm {
                choices: SearchEngine::ALL.to_vec(),
                search_engine,
                homepage,
            };
            sessions.save_settings(&form)?;
            json!({ "ok": true })
        }
        ShellCommand::PageText => {
            let text = Rc::new(RefCell::new(None));
            let slot = Rc::clone(&text);
            sessions.active_page_text(Box::new(move |t| *slot.borrow_mut() = Some(t)));
            let text = text.borrow_mut().take();
            json!({ "text": text })
        }
        ShellCommand::State => json!({}),
        ShellCommand::Quit => json!({ "ok": true }),
    };

    sessions.pump_events();
    Ok(with_state(result, app))
}

/// Adds the tab list and chrome state to a command result.
fn with_state<F, C>(mut result: Value, app: &App<F, C>) -> Value
where
    F: EngineFactory,
    C: ChromeView + Serialize,
{
    if let Value::Object(map) = &mut result {
        map.insert("tabs".to_string(), json!(app.sessions.tab_summaries()));
        map.insert("chrome".to_string(), json!(app.sessions.chrome()));
    }
    result
}
