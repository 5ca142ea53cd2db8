//! # Configuration
//!
//! Command line arguments, each with an environment fallback, folded into
//! one [`EditorConfig`].

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use editor_core::{SessionConfig, DEFAULT_QUIT_TIMES, DEFAULT_TAB_STOP};
use services_editor_tty::DEFAULT_MESSAGE_TIMEOUT;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "bedit", about = "A small terminal text editor", version)]
pub struct Cli {
    #[arg(
        value_name = "FILE",
        help = "File to open. A missing file is created on first save"
    )]
    pub path: Option<String>,

    #[arg(
        long,
        env = "BEDIT_TAB_STOP",
        default_value_t = DEFAULT_TAB_STOP,
        value_parser = parse_tab_stop,
        help = "Columns between tab stops"
    )]
    pub tab_stop: usize,

    #[arg(
        long,
        env = "BEDIT_QUIT_TIMES",
        default_value_t = DEFAULT_QUIT_TIMES,
        help = "Extra Ctrl-Q presses needed to quit with unsaved changes"
    )]
    pub quit_times: usize,

    #[arg(
        long = "message-timeout",
        env = "BEDIT_MESSAGE_TIMEOUT",
        default_value_t = DEFAULT_MESSAGE_TIMEOUT.as_secs(),
        help = "Seconds a status message stays visible"
    )]
    pub message_timeout_secs: u64,

    #[arg(
        long,
        env = "BEDIT_LOG_FILE",
        help = "Write logs to this file. Logging is off without it"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        env = "BEDIT_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log filter directive; RUST_LOG takes precedence"
    )]
    pub log_level: String,
}

fn parse_tab_stop(value: &str) -> Result<usize, String> {
    let tab_stop: usize = value
        .parse()
        .map_err(|_| format!("Invalid tab stop: {}", value))?;
    if tab_stop == 0 {
        return Err("tab stop must be at least 1".to_string());
    }
    Ok(tab_stop)
}

/// Editor host configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// File to open, if any
    pub path: Option<String>,
    pub tab_stop: usize,
    pub quit_times: usize,
    pub message_timeout: Duration,
    /// Log destination; `None` disables logging
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl EditorConfig {
    /// The subset the editing session needs
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            tab_stop: self.tab_stop,
            quit_times: self.quit_times,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            path: None,
            tab_stop: DEFAULT_TAB_STOP,
            quit_times: DEFAULT_QUIT_TIMES,
            message_timeout: DEFAULT_MESSAGE_TIMEOUT,
            log_file: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl From<Cli> for EditorConfig {
    fn from(cli: Cli) -> Self {
        Self {
            path: cli.path,
            tab_stop: cli.tab_stop,
            quit_times: cli.quit_times,
            message_timeout: Duration::from_secs(cli.message_timeout_secs),
            log_file: cli.log_file,
            log_level: cli.log_level,
        }
    }
}
