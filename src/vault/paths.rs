//! Where notes land inside the vault.

use std::path::{Path, PathBuf};

/// Directory receiving notes: the vault root, or `root/subfolder` when a
/// subfolder is configured.
pub fn target_dir(vault_root: &Path, subfolder: &str) -> PathBuf {
    if subfolder.is_empty() {
        vault_root.to_path_buf()
    } else {
        vault_root.join(subfolder)
    }
}

/// Full path of the note for `base_name`.
pub fn note_path(vault_root: &Path, subfolder: &str, base_name: &str) -> PathBuf {
    target_dir(vault_root, subfolder).join(format!("{}.md", base_name))
}

/// The note's path relative to the vault root, as shown to the user.
pub fn note_relative_path(subfolder: &str, base_name: &str) -> String {
    if subfolder.is_empty() {
        format!("{}.md", base_name)
    } else {
        format!("{}/{}.md", subfolder, base_name)
    }
}

/// Whether `path` lies within `vault_root`.
pub fn is_inside_vault(path: &Path, vault_root: &Path) -> bool {
    let root = vault_root
        .canonicalize()
        .unwrap_or_else(|_| vault_root.to_path_buf());
    path.starts_with(&root) || path.starts_with(vault_root)
}
