//! Shared utilities for CLI commands

use std::time::Duration;
use tabled::{Table, settings::Style};

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}

/// Parse a millisecond count given on the command line
pub fn parse_millis(s: &str) -> Result<Duration, String> {
    s.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| format!("'{}' is not a number of milliseconds", s))
}
