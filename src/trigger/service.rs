//! Sync service - the three user-facing triggers.
//!
//! Manual commands report every failure to the caller. The save-triggered
//! path never does: its failures are logged and go no further.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::TriggerError;
use super::feedback::{DirectoryPicker, Notifier};
use crate::note::{SourceFile, render_source};
use crate::settings::{SettingsStore, SyncSettings};
use crate::vault::{is_inside_vault, note_relative_path, write_note};

/// Title of the vault folder prompt.
pub const VAULT_PROMPT_TITLE: &str = "Select your notes vault directory";

/// How long the auto-sync status line stays up.
pub const AUTO_SYNC_STATUS_DURATION: Duration = Duration::from_secs(3);

/// Path fragments that keep a saved file out of auto-sync.
pub const EXCLUDED_PATTERNS: &[&str] = &[".git", ".gitignore", ".env", ".lock"];

/// Whether a saved path is excluded from auto-sync.
///
/// This is a plain substring test on the whole path, so `my.env.example.txt`
/// is excluded too.
pub fn is_excluded(path: &Path) -> bool {
    let path = path.to_string_lossy();
    EXCLUDED_PATTERNS
        .iter()
        .any(|pattern| path.contains(pattern))
}

/// Result of a successful manual sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Absolute path of the written note.
    pub path: PathBuf,
    /// Note path relative to the vault root.
    pub relative: String,
}

/// Why a save notification did not produce a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    NoVault,
    Excluded,
    InsideVault,
}

/// Outcome of one save notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoSync {
    Synced(PathBuf),
    Skipped(SkipReason),
    Failed,
}

/// Whether a vault is ready to receive notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready { vault_root: PathBuf },
    NotConfigured,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Ready { vault_root } => {
                let name = vault_root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| vault_root.to_string_lossy().into_owned());
                write!(f, "codenote is ready! Vault: {}", name)
            }
            Readiness::NotConfigured => write!(
                f,
                "codenote is ready! Use `cnote set-vault` to choose a notes vault."
            ),
        }
    }
}

/// Binds the sync action to its triggers.
pub struct SyncService<S, P, N> {
    store: S,
    picker: P,
    notifier: N,
    clock: fn() -> DateTime<Local>,
}

impl<S, P, N> SyncService<S, P, N>
where
    S: SettingsStore,
    P: DirectoryPicker,
    N: Notifier,
{
    pub fn new(store: S, picker: P, notifier: N) -> Self {
        Self {
            store,
            picker,
            notifier,
            clock: Local::now,
        }
    }

    /// Replace the clock used for `Last synced` lines.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Sync the active file on request.
    ///
    /// Prompts for a vault when none is configured or the configured one is
    /// gone, persists the choice and carries on with it.
    pub async fn save_current_file(
        &self,
        file: Option<SourceFile>,
    ) -> Result<SyncReport, TriggerError> {
        let file = file.ok_or(TriggerError::NoActiveFile)?;
        let settings = self.store.load()?;

        let vault_root = match settings.existing_vault_root() {
            Some(root) => root.clone(),
            None => self
                .prompt_for_vault()?
                .ok_or(TriggerError::NoVaultSelected)?,
        };

        let path = self.write(&file, &settings, &vault_root).await?;
        let relative = note_relative_path(&settings.subfolder, &file.base_name);

        info!(source = %file.path.display(), note = %path.display(), "Saved to notes vault");
        self.notifier
            .info(&format!("Saved to notes vault: {}", relative));

        Ok(SyncReport { path, relative })
    }

    /// Ask for a vault directory and persist it.
    ///
    /// A cancelled prompt is a warning, not an error, and leaves the stored
    /// setting alone.
    pub fn set_vault_path(&self) -> Result<Option<PathBuf>, TriggerError> {
        let selected = self.prompt_for_vault()?;
        if selected.is_none() {
            self.notifier.warning("No path selected");
        }
        Ok(selected)
    }

    /// Handle a save notification.
    ///
    /// Never reports anything to the user except the transient status line on
    /// success.
    pub async fn on_file_saved(&self, path: &Path) -> AutoSync {
        let settings = match self.store.load() {
            Ok(settings) => settings,
            Err(e) => return Self::background_failure(path, &e),
        };

        if !settings.auto_sync {
            return AutoSync::Skipped(SkipReason::Disabled);
        }

        let Some(vault_root) = settings.existing_vault_root().cloned() else {
            debug!(path = %path.display(), "Auto-sync skipped: no vault");
            return AutoSync::Skipped(SkipReason::NoVault);
        };

        if is_excluded(path) {
            debug!(path = %path.display(), "Auto-sync skipped: excluded path");
            return AutoSync::Skipped(SkipReason::Excluded);
        }

        if is_inside_vault(path, &vault_root) {
            debug!(path = %path.display(), "Auto-sync skipped: file is inside the vault");
            return AutoSync::Skipped(SkipReason::InsideVault);
        }

        let file = match SourceFile::read(path, None).await {
            Ok(file) => file,
            Err(e) => return Self::background_failure(path, &e),
        };

        match self.write(&file, &settings, &vault_root).await {
            Ok(note) => {
                info!(source = %file.path.display(), note = %note.display(), "Auto-synced");
                self.notifier.status(
                    &format!("Auto-synced to notes vault: {}.md", file.base_name),
                    AUTO_SYNC_STATUS_DURATION,
                );
                AutoSync::Synced(note)
            }
            Err(e) => Self::background_failure(path, &e),
        }
    }

    /// Whether the configured vault exists.
    pub fn readiness(&self) -> Result<Readiness, TriggerError> {
        let settings = self.store.load()?;
        Ok(match settings.existing_vault_root() {
            Some(root) => Readiness::Ready {
                vault_root: root.clone(),
            },
            None => Readiness::NotConfigured,
        })
    }

    async fn write(
        &self,
        file: &SourceFile,
        settings: &SyncSettings,
        vault_root: &Path,
    ) -> Result<PathBuf, TriggerError> {
        let document = render_source(file, settings.add_timestamp, self.clock);
        let path = write_note(vault_root, &settings.subfolder, &file.base_name, &document).await?;
        Ok(path)
    }

    fn prompt_for_vault(&self) -> Result<Option<PathBuf>, TriggerError> {
        let Some(selected) = self.picker.pick_directory(VAULT_PROMPT_TITLE) else {
            return Ok(None);
        };

        if !selected.is_dir() {
            return Err(TriggerError::VaultNotFound { path: selected });
        }
        let selected = selected.canonicalize().unwrap_or(selected);

        self.store.set_vault_root(&selected)?;
        info!(vault = %selected.display(), "Notes vault path saved");
        self.notifier.info(&format!(
            "Notes vault path set to: {}",
            selected.display()
        ));

        Ok(Some(selected))
    }

    fn background_failure(path: &Path, error: &dyn std::error::Error) -> AutoSync {
        warn!(path = %path.display(), error = %error, "Auto-sync failed");
        AutoSync::Failed
    }
}
