mod commands;
pub mod error;
pub mod utils;


use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::{JsonSettingsStore, get_settings_path};
use crate::trigger::{ConsoleNotifier, PresetPicker, StdinPicker, SyncService};
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "cnote")]
#[command(author, version, about = "Copy source files into notes vault markdown", long_about = None)]
pub struct Cli {
    /// Settings file (default: CNOTE_CONFIG env or ~/.config/codenote/settings.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a file to the notes vault
    Save {
        /// File to copy into the vault
        file: Option<PathBuf>,
        /// Language id used when the extension is not recognised
        #[arg(long)]
        language: Option<String>,
    },
    /// Set the notes vault path (prompts when PATH is omitted)
    SetVault {
        /// Vault directory
        path: Option<PathBuf>,
    },
    /// Auto-sync files under a directory whenever they are saved
    Watch {
        /// Directory to watch
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Quiet period before a write counts as a save, in milliseconds
        #[arg(long = "debounce-ms", default_value = "300", value_parser = utils::parse_millis)]
        debounce: Duration,
    },
    /// Show whether a vault is configured and the current settings
    Status,
    /// Read or change a single setting
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print a setting (obsidianPath, subfolder, autoSync, addTimestamp)
    Get {
        /// Setting key
        key: String,
    },
    /// Change a setting
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
    /// Print the settings file location
    Path,
}

/// Initialize tracing subscriber with env filter, logging to stderr
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "codenote=debug"
    } else {
        "codenote=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn settings_store(config: Option<PathBuf>) -> CliResult<JsonSettingsStore> {
    config
        .or_else(get_settings_path)
        .map(JsonSettingsStore::new)
        .ok_or(CliError::NoSettingsPath)
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        // Show help when no command provided
        let _ = Cli::parse_from(["cnote", "--help"]);
        return Ok(());
    };

    let store = settings_store(cli.config)?;

    match command {
        Commands::Save { file, language } => {
            let service = SyncService::new(store, StdinPicker, ConsoleNotifier::new());
            commands::save::save(&service, file, language).await?;
        }
        Commands::SetVault { path } => match path {
            Some(path) => {
                let service = SyncService::new(store, PresetPicker::new(path), ConsoleNotifier::new());
                commands::vault::set_vault(&service)?;
            }
            None => {
                let service = SyncService::new(store, StdinPicker, ConsoleNotifier::new());
                commands::vault::set_vault(&service)?;
            }
        },
        Commands::Watch { dir, debounce } => {
            let service = SyncService::new(store, PresetPicker::none(), ConsoleNotifier::new());
            let summary = commands::watch::watch(&service, &dir, debounce).await?;
            println!(
                "\nStopped watching: {} synced, {} skipped, {} failed",
                summary.synced, summary.skipped, summary.failed
            );
        }
        Commands::Status => {
            let readiness = SyncService::new(store.clone(), PresetPicker::none(), ConsoleNotifier::new())
                .readiness()
                .map_err(CliError::from)?;
            println!("{}", commands::config::status(&store, &readiness)?);
        }
        Commands::Config { command } => match command {
            ConfigCommands::Get { key } => {
                println!("{}", commands::config::get(&store, &key)?);
            }
            ConfigCommands::Set { key, value } => {
                println!("{}", commands::config::set(&store, &key, &value)?);
            }
            ConfigCommands::Path => println!("{}", store.path().display()),
        },
    }

    Ok(())
}
