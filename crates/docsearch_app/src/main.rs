//! docsearch: ask the GitHub Docs AI search from the terminal.

mod platform;
mod preferences;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use docsearch_logging::LogDestination;

use crate::preferences::Preferences;

#[derive(Parser)]
#[command(name = "docsearch", about = "Ask the GitHub Docs AI search", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Docs version to search, e.g. `enterprise-cloud@latest`
    #[arg(long, global = true)]
    docs_version: Option<String>,

    /// Preferences file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Search the selected text (or clipboard) and copy the answer to the clipboard
    Copy {
        /// Open the first source in the browser after copying
        #[arg(long)]
        open: bool,
    },
    /// Ask a question and read the answer in the terminal
    Ask {
        /// Question to ask; prompts when omitted
        query: Vec<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = docsearch_logging::level_for_verbosity(cli.verbose);
    match cli.log_file.as_deref() {
        Some(path) => docsearch_logging::initialize(LogDestination::Both(path), level),
        None => docsearch_logging::initialize(LogDestination::Terminal, level),
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => preferences::default_path().context("locating preferences file")?,
    };
    let mut prefs = Preferences::load_or_default(&config_path);
    if let Some(version) = cli.docs_version {
        prefs.default_version = Some(version);
    }

    match cli.command {
        Command::Copy { open } => platform::headless::run(&prefs, open),
        Command::Ask { query } => {
            let initial = (!query.is_empty()).then(|| query.join(" "));
            platform::app::run(&prefs, initial)
        }
    }
}
