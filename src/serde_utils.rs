/// Serde utility functions for the settings file
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Deserialize an optional path where an empty or blank string means unset.
///
/// - Missing field → `None` (with `#[serde(default)]`)
/// - `null` or `""` → `None`
/// - Anything else → `Some(path)`
///
/// Usage:
/// ```ignore
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(default, deserialize_with = "crate::serde_utils::empty_path_as_none")]
///     root: Option<PathBuf>,
/// }
/// ```
pub fn empty_path_as_none<'de, D>(de: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(de)?;
    Ok(value
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from))
}

/// Serialize an optional path as a string, writing `""` when unset.
pub fn path_or_empty<S>(path: &Option<PathBuf>, ser: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match path {
        Some(p) => ser.serialize_str(&p.to_string_lossy()),
        None => ser.serialize_str(""),
    }
}
