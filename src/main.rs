//! Etch - a minimal terminal text editor with pattern search.
//!
//! # Usage
//!
//! ```bash
//! etch notes.txt
//! etch --regex notes.txt
//! etch
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use etch::app::App;
use etch::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A minimal terminal text editor with pattern search
#[derive(Parser, Debug)]
#[command(name = "etch", version, about, long_about = None)]
struct Cli {
    /// File to edit (starts with an empty buffer when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Start with regex pattern matching enabled
    #[arg(short, long)]
    regex: bool,

    /// Do not watch the loaded file for on-disk changes
    #[arg(long)]
    no_watch: bool,

    /// Append log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Save current command-line flags as defaults in the config file
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in the config file
    #[arg(long)]
    clear: bool,
}

// The terminal belongs to the TUI while we run, so file logging is the only
// way to watch verbose output live.
fn init_logging(log_path: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    match log_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log.as_deref())?;

    let mut app = App::new(cli.file)
        .with_regex(effective.regex)
        .with_watch(!effective.no_watch);

    app.run().context("Application error")
}
