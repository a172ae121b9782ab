//! Write rendered notes into the vault.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::VaultError;
use super::paths::{note_path, target_dir};

/// Write `document` as `<base_name>.md` under the vault.
///
/// Creates the target directory and any missing ancestors, then replaces the
/// note in one write. The vault root itself is not validated here; callers
/// resolve it first.
///
/// # Returns
/// Path of the written note.
pub async fn write_note(
    vault_root: &Path,
    subfolder: &str,
    base_name: &str,
    document: &str,
) -> Result<PathBuf, VaultError> {
    let dir = target_dir(vault_root, subfolder);

    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|source| VaultError::CreateDir {
            path: dir.clone(),
            source,
        })?;

    let path = note_path(vault_root, subfolder, base_name);
    tokio::fs::write(&path, document)
        .await
        .map_err(|source| VaultError::Write {
            path: path.clone(),
            source,
        })?;

    debug!(path = %path.display(), bytes = document.len(), "Wrote note");
    Ok(path)
}
