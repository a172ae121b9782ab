//! `cnote set-vault` - choose the notes vault.

use std::path::PathBuf;

use crate::cli::error::CliResult;
use crate::settings::SettingsStore;
use crate::trigger::{DirectoryPicker, Notifier, SyncService};

/// Run the vault selection flow. `None` means the prompt was cancelled.
pub fn set_vault<S, P, N>(service: &SyncService<S, P, N>) -> CliResult<Option<PathBuf>>
where
    S: SettingsStore,
    P: DirectoryPicker,
    N: Notifier,
{
    Ok(service.set_vault_path()?)
}
