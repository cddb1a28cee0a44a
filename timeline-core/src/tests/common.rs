use crate::{Config, SortDirection};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(reference_date: Option<NaiveDate>) -> Config {
    Config {
        sort_direction: SortDirection::Ascending,
        timeline_color: "#5588cc".to_string(),
        dot_size: 12,
        line_width: 2,
        item_spacing: 20,
        show_tooltip: true,
        tooltip_delay: 500,
        highlight_today: true,
        created_date_field: "created".to_string(),
        vault_dir: PathBuf::from("."),
        reference_date: reference_date.unwrap_or(Local::now().date_naive()),
    }
}
