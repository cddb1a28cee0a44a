use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use strum_macros::EnumString;

/// Order of events on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, EnumString)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    #[strum(serialize = "asc", serialize = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    #[strum(serialize = "desc", serialize = "descending")]
    Descending,
}

/// Named colors accepted for `timeline_color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ColorPreset {
    Blue,
    Green,
    Purple,
    Red,
    Orange,
}

impl ColorPreset {
    pub fn hex(self) -> &'static str {
        match self {
            ColorPreset::Blue => "#5588cc",
            ColorPreset::Green => "#50C878",
            ColorPreset::Purple => "#9370DB",
            ColorPreset::Red => "#FF6B6B",
            ColorPreset::Orange => "#FF8C42",
        }
    }
}

const DEFAULT_COLOR: &str = "#5588cc";

#[derive(Debug, Clone)]
pub struct Config {
    pub sort_direction: SortDirection,
    /// Accent color as `#rrggbb`.
    pub timeline_color: String,
    /// Dot diameter in pixels.
    pub dot_size: u32,
    /// Width of the vertical line in pixels.
    pub line_width: u32,
    /// Space between events in pixels.
    pub item_spacing: u32,
    pub show_tooltip: bool,
    /// Hover delay before the tooltip shows, in milliseconds.
    pub tooltip_delay: u64,
    pub highlight_today: bool,
    /// Frontmatter attribute holding a note's date when aggregating.
    pub created_date_field: String,
    /// Directory scanned for notes when aggregating.
    pub vault_dir: PathBuf,
    /// The day treated as "today" for relative days and highlighting.
    pub reference_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    sort_direction: Option<SortDirection>,
    timeline_color: Option<String>,
    dot_size: Option<u32>,
    line_width: Option<u32>,
    item_spacing: Option<u32>,
    show_tooltip: Option<bool>,
    tooltip_delay: Option<u64>,
    highlight_today: Option<bool>,
    created_date_field: Option<String>,
    vault_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file_config(FileConfig::default())
    }
}

impl Config {
    /// Loads the first config file found (XDG path, then native) and fills the
    /// gaps with defaults. A file that cannot be read or parsed is reported and ignored.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|error| {
            tracing::warn!("ignoring config file: {error:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let timeline_color = file_config
            .timeline_color
            .as_deref()
            .and_then(|color| {
                let resolved = resolve_color(color);
                if resolved.is_none() {
                    tracing::warn!("unknown timeline_color `{color}`, using {DEFAULT_COLOR}");
                }
                resolved
            })
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());

        Self {
            sort_direction: file_config.sort_direction.unwrap_or_default(),
            timeline_color,
            dot_size: file_config.dot_size.unwrap_or(12),
            line_width: file_config.line_width.unwrap_or(2),
            item_spacing: file_config.item_spacing.unwrap_or(20),
            show_tooltip: file_config.show_tooltip.unwrap_or(true),
            tooltip_delay: file_config.tooltip_delay.unwrap_or(500),
            highlight_today: file_config.highlight_today.unwrap_or(true),
            created_date_field: file_config
                .created_date_field
                .unwrap_or_else(|| "created".to_string()),
            vault_dir: file_config.vault_dir.unwrap_or_else(|| PathBuf::from(".")),
            reference_date: Local::now().date_naive(),
        }
    }

    /// The accent color as RGB components.
    pub fn timeline_rgb(&self) -> (u8, u8, u8) {
        parse_hex(&self.timeline_color)
            .or_else(|| parse_hex(DEFAULT_COLOR))
            .unwrap_or((0x55, 0x88, 0xcc))
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("timeline")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("timeline").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            tracing::debug!("loading config from {}", path.display());
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

/// Accepts a preset name or a `#rrggbb` value.
fn resolve_color(color: &str) -> Option<String> {
    let color = color.trim();
    if let Ok(preset) = color.parse::<ColorPreset>() {
        return Some(preset.hex().to_string());
    }
    parse_hex(color).map(|_| color.to_string())
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
