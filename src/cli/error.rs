use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::settings::SettingsError;
use crate::trigger::{TriggerError, WatcherError};

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Could not determine where settings are stored")]
    #[diagnostic(
        code(codenote::cli::no_settings_path),
        help("Set HOME, XDG_CONFIG_HOME or CNOTE_CONFIG, or pass --config <FILE>.")
    )]
    NoSettingsPath,

    #[error("Watch directory does not exist: {path}")]
    #[diagnostic(code(codenote::cli::watch_root))]
    WatchRoot { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Trigger(#[from] TriggerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Watcher(#[from] WatcherError),
}

pub type CliResult<T> = Result<T, CliError>;
