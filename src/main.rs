//! NovaBrowse: headless shell entry point.
//!
//! Drives the tab sessions with the bundled in-memory engine. Reads one JSON
//! command per stdin line and prints one JSON result per line, so a GUI front
//! end or a script can stand in for the toolbar.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use serde_json::json;

use novabrowse::app::App;
use novabrowse::command_handler::{handle_command, parse_command, ShellCommand};
use novabrowse::database::Database;
use novabrowse::engine::headless::HeadlessEngineFactory;
use novabrowse::logging::init_logging;
use novabrowse::services::shell_config::{ShellConfigLoader, ShellConfigLoaderTrait};
use novabrowse::ui::headless::HeadlessChrome;

#[derive(Debug, Parser)]
#[command(name = "novabrowse", version, about = "Tabbed browser shell driven by JSON commands")]
struct Cli {
    /// Shell configuration file
    #[arg(long, env = "NOVABROWSE_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database, overriding the configured one
    #[arg(long, conflicts_with = "in_memory")]
    database: Option<PathBuf>,

    /// Keep history, bookmarks and settings in memory only
    #[arg(long)]
    in_memory: bool,

    /// Home document, overriding the configured one
    #[arg(long)]
    homepage: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut loader = ShellConfigLoader::new(cli.config.clone());
    let mut config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("novabrowse: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = &cli.database {
        config.database_path = Some(path.to_string_lossy().to_string());
    }
    if let Some(path) = &cli.homepage {
        config.homepage_path = Some(path.to_string_lossy().to_string());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    init_logging(&config.log_level);
    info!("config loaded from {}", loader.get_config_path().display());

    let factory = HeadlessEngineFactory::new();
    let chrome = HeadlessChrome::new();
    let app: Result<_, Box<dyn std::error::Error>> = if cli.in_memory {
        Database::open_in_memory()
            .map(|db| App::with_database(db, config, factory, chrome))
            .map_err(Box::from)
    } else {
        App::new(config, factory, chrome)
    };
    let mut app = match app {
        Ok(app) => app,
        Err(e) => {
            error!("cannot open browser database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    app.startup();
    if let Err(e) = run(&mut app) {
        error!("stdin/stdout failed: {}", e);
    }

    match app.shutdown() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(app: &mut App<HeadlessEngineFactory, HeadlessChrome>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    let ready = handle_command(app, ShellCommand::State)
        .map(|state| json!({ "ok": true, "ready": true, "result": state }))
        .unwrap_or_else(|e| json!({ "ok": false, "error": e.to_string() }));
    writeln!(stdout, "{}", ready)?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = parse_command(&line);
        let quit = matches!(command, Ok(ShellCommand::Quit));
        let response = match command.and_then(|cmd| handle_command(app, cmd)) {
            Ok(result) => json!({ "ok": true, "result": result }),
            Err(e) => json!({ "ok": false, "error": e.to_string() }),
        };
        writeln!(stdout, "{}", response)?;
        stdout.flush()?;

        if quit {
            break;
        }
    }
    Ok(())
}
