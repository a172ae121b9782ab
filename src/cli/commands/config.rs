//! Config and status command implementations.

use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::apply_table_style;
use crate::settings::{JsonSettingsStore, SettingKey, SettingsStore};
use crate::trigger::Readiness;

#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Print one setting.
pub fn get(store: &JsonSettingsStore, key: &str) -> CliResult<String> {
    let key: SettingKey = key.parse()?;
    let settings = store.load()?;
    Ok(settings.get(key))
}

/// Change one setting and persist it.
pub fn set(store: &JsonSettingsStore, key: &str, value: &str) -> CliResult<String> {
    let key: SettingKey = key.parse()?;
    let mut settings = store.load()?;
    settings.set(key, value)?;
    store.save(&settings)?;

    Ok(format!("✓ {} = {}", key, settings.get(key)))
}

/// Readiness line, settings file location and every setting.
pub fn status(store: &JsonSettingsStore, readiness: &Readiness) -> CliResult<String> {
    let settings = store.load()?;

    let rows: Vec<SettingRow> = SettingKey::ALL
        .into_iter()
        .map(|key| {
            let value = settings.get(key);
            SettingRow {
                key: key.to_string(),
                value: if value.is_empty() {
                    "-".to_string()
                } else {
                    value
                },
            }
        })
        .collect();

    let mut table = Table::new(rows);
    apply_table_style(&mut table);

    let mut output = String::new();
    output.push_str(&format!("{}\n\n", readiness));
    output.push_str(&format!("Settings: {}\n", store.path().display()));
    output.push_str(&table.to_string());
    Ok(output)
}
