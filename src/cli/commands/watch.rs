//! `cnote watch` - auto-sync files as they are saved.

use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::error::{CliError, CliResult};
use crate::settings::SettingsStore;
use crate::trigger::{
    DirectoryPicker, Notifier, SaveWatcher, SyncService, WatchSummary, WatcherConfig,
};

/// Watch `dir` until Ctrl-C.
///
/// Settings are re-read for every save, so turning `autoSync` on while the
/// watcher runs takes effect immediately.
pub async fn watch<S, P, N>(
    service: &SyncService<S, P, N>,
    dir: &Path,
    debounce: Duration,
) -> CliResult<WatchSummary>
where
    S: SettingsStore,
    P: DirectoryPicker,
    N: Notifier,
{
    let root = dir.canonicalize().map_err(|_| CliError::WatchRoot {
        path: dir.to_path_buf(),
    })?;

    let settings = service.store().load()?;
    if !settings.auto_sync {
        eprintln!(
            "⚠ autoSync is off; saves are ignored until `cnote config set autoSync true`"
        );
    }
    println!("{}", service.readiness()?);
    println!("Watching {} (Ctrl-C to stop)", root.display());

    let watcher = SaveWatcher::new(WatcherConfig::new(&root).with_debounce(debounce))?;

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let summary = watcher.run(service, cancel).await;
    info!(
        synced = summary.synced,
        skipped = summary.skipped,
        failed = summary.failed,
        "Watch finished"
    );
    Ok(summary)
}
