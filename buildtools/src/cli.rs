use std::env;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

// Exit codes shared by the binaries
pub const ERR_CORRELATION: i32 = 1;
pub const ERR_IO: i32 = 2;

/// Raises the log level above `warn` (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub const LOG_ENV_VAR: &str = "BUILDTOOLS_LOG";

pub fn log_level(setting: Option<&str>) -> LevelFilter {
    setting
        .and_then(|level| level.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Logs go to stderr; stdout carries the tool's output.
pub fn configure_logging() {
    let setting = env::var(LOG_ENV_VAR).ok();
    let level = log_level(setting.as_deref());
    // Only fails if a logger is already installed.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}
