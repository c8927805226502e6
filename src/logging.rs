//! Logger setup for the NovaBrowse binary.
//!
//! The library only uses the `log` macros; the binary decides where they go.

/// Installs `env_logger` with `default_level` unless `RUST_LOG` says
/// otherwise. Calling it twice is harmless.
pub fn init_logging(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .try_init();
}
