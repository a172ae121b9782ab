//! Markdown rendering of a source snapshot.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use super::language::classify;
use super::source::SourceFile;

/// Timestamp layout for the `Last synced` line, e.g. `10/14/2026, 3:04:05 PM`.
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Compose the note for one file.
///
/// Sections are separated by a blank line: the `# <file_name>` heading, the
/// optional `> Last synced:` quote, the `**File:**` line and finally a fenced
/// block holding `text` verbatim. `now` is only called when `add_timestamp`
/// is set.
///
/// Content is not escaped. A ```` ``` ```` line inside `text` closes the fence
/// early in the rendered view.
pub fn render<Tz, F>(
    file_name: &str,
    file_path: &str,
    text: &str,
    language: &str,
    add_timestamp: bool,
    now: F,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
    F: FnOnce() -> DateTime<Tz>,
{
    let mut output = format!("# {}\n\n", file_name);

    if add_timestamp {
        output.push_str(&format!(
            "> Last synced: {}\n\n",
            now().format(TIMESTAMP_FORMAT)
        ));
    }

    output.push_str(&format!("**File:** `{}`\n\n", file_path));
    output.push_str(&format!("```{}\n{}\n```", language, text));

    output
}

/// Classify and render a snapshot in one step.
pub fn render_source<Tz, F>(file: &SourceFile, add_timestamp: bool, now: F) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
    F: FnOnce() -> DateTime<Tz>,
{
    let language = classify(&file.extension, file.content_type_hint.as_deref());
    render(
        &file.file_name(),
        &file.display_path(),
        &file.text,
        &language,
        add_timestamp,
        now,
    )
}
