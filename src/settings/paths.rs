//! Path resolution for the settings file.
//!
//! Provides XDG-compliant path resolution with an environment override.

use std::env;
use std::path::PathBuf;

/// Environment variable pointing straight at a settings file.
pub const CONFIG_ENV: &str = "CNOTE_CONFIG";

const APP_DIR: &str = "codenote";
const SETTINGS_FILE: &str = "settings.json";

/// Get XDG-compliant config directory for codenote.
///
/// # Returns
/// `$XDG_CONFIG_HOME/codenote`, else `$HOME/.config/codenote`, or `None`
/// when neither variable is set.
pub fn get_config_dir() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var_os("HOME")
                .filter(|v| !v.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .map(|dir| dir.join(APP_DIR))
}

/// Get the settings file path.
///
/// `$CNOTE_CONFIG` wins over the config directory.
pub fn get_settings_path() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| get_config_dir().map(|dir| dir.join(SETTINGS_FILE)))
}
