//! `cnote save` - copy one file into the vault.

use std::path::PathBuf;

use crate::cli::error::CliResult;
use crate::note::SourceFile;
use crate::settings::SettingsStore;
use crate::trigger::{DirectoryPicker, Notifier, SyncReport, SyncService, TriggerError};

/// Snapshot `file` and sync it. A missing `file` is the "no active file"
/// case.
pub async fn save<S, P, N>(
    service: &SyncService<S, P, N>,
    file: Option<PathBuf>,
    language: Option<String>,
) -> CliResult<SyncReport>
where
    S: SettingsStore,
    P: DirectoryPicker,
    N: Notifier,
{
    let source = match file {
        Some(path) => {
            let snapshot = SourceFile::read(&path, language)
                .await
                .map_err(TriggerError::from)?;
            Some(snapshot)
        }
        None => None,
    };

    Ok(service.save_current_file(source).await?)
}
