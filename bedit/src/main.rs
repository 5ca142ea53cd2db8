//! # BeDIT
//!
//! Entry point for the terminal editor.

use bedit::{logging, Cli, EditorConfig};
use clap::Parser;
use miette::IntoDiagnostic;

fn main() -> miette::Result<()> {
    let config = EditorConfig::from(Cli::parse());
    let _log_guard = logging::init(&config).into_diagnostic()?;

    bedit::run(&config).into_diagnostic()
}
