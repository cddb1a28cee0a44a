use super::theme::OneDark;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};
use timeline_core::{
    BlockError, Config, TimelineEvent,
    aggregate::AggregateError,
    parse_block::ACCEPTED_SYNTAXES,
};

static WIKILINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("valid wikilink regex"));

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
}

/// Terminal counterparts of the pixel settings in [`Config`].
struct TimelineStyle {
    accent: Color,
    dot: &'static str,
    line: &'static str,
    /// Empty rail lines between events.
    spacing: usize,
    show_relative: bool,
    highlight_today: bool,
    today: NaiveDate,
}

impl TimelineStyle {
    fn from_config(config: &Config) -> Self {
        let (r, g, b) = config.timeline_rgb();
        Self {
            accent: Color::Rgb { r, g, b },
            dot: match config.dot_size {
                0..=8 => "•",
                9..=16 => "●",
                _ => "⬤",
            },
            line: match config.line_width {
                0..=1 => "│",
                2..=3 => "┃",
                _ => "█",
            },
            spacing: (config.item_spacing / 10) as usize,
            show_relative: config.show_tooltip,
            highlight_today: config.highlight_today,
            today: config.reference_date,
        }
    }
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
    style: TimelineStyle,
}

impl Renderer {
    pub fn new(opts: RenderOptions, config: &Config) -> Self {
        let style = TimelineStyle::from_config(config);
        Self {
            skin: OneDark::timeline_skin(style.accent),
            opts,
            style,
        }
    }

    pub fn print_md(&self, md: &str) {
        self.skin.print_text(md);
    }

    /// Status messages go to stderr so stdout stays pipeable.
    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            eprint!("{}", self.skin.term_text(&md));
        } else {
            eprintln!("{message}");
        }
    }

    pub fn print_separator(&self) {
        if self.opts.use_color {
            self.print_md("---");
        } else {
            println!("---");
        }
    }

    pub fn print_timeline(&self, events: &[TimelineEvent]) {
        if events.is_empty() {
            self.print_info("No events in this timeline.");
            return;
        }

        for (i, event) in events.iter().enumerate() {
            println!("{}", self.event_heading(event));
            self.print_body(&event.body);

            if i + 1 < events.len() {
                for _ in 0..self.style.spacing {
                    println!("{}", self.rail());
                }
            }
        }
    }

    pub fn print_block_error(&self, error: &BlockError) {
        let syntaxes: String = ACCEPTED_SYNTAXES
            .iter()
            .map(|syntax| format!("* `{syntax}`\n"))
            .collect();
        if self.opts.use_color {
            let title = "Timeline parse error".with(OneDark::RED).bold();
            eprintln!("{title}: {error}");
            eprint!(
                "{}",
                self.skin
                    .term_text(&format!("Check that the lines follow one of these forms:\n{syntaxes}"))
            );
        } else {
            eprintln!("Timeline parse error: {error}");
            eprintln!("Check that the lines follow one of these forms:");
            eprint!("{}", syntaxes.replace('`', ""));
        }
    }

    pub fn print_aggregate_errors(&self, errors: &[AggregateError]) {
        for error in errors {
            let message = match error {
                AggregateError::InvalidDate { note, value } => {
                    format!("{}: `{value}` is not a date", note.display())
                }
                AggregateError::FileError { path, error } => {
                    format!("{}: {error:#}", path.display())
                }
            };
            if self.opts.use_color {
                eprintln!("{} {message}", "skipped".with(OneDark::ORANGE));
            } else {
                eprintln!("skipped {message}");
            }
        }
    }

    fn rail(&self) -> String {
        if self.opts.use_color {
            self.style.line.with(self.style.accent).to_string()
        } else {
            self.style.line.to_string()
        }
    }

    fn event_heading(&self, event: &TimelineEvent) -> String {
        let parts = event.display_parts();
        let relative = event.relative_to(self.style.today);
        let is_today = relative.is_today() && self.style.highlight_today;

        let mut date = parts.date;
        let mut time = parts.time.unwrap_or_default();
        let mut dot = self.style.dot.to_string();
        let mut relative = if self.style.show_relative {
            format!("({relative})")
        } else {
            String::new()
        };
        if self.opts.use_color {
            dot = dot.with(self.style.accent).to_string();
            date = if is_today {
                date.with(self.style.accent).bold().to_string()
            } else {
                date.with(OneDark::YELLOW).to_string()
            };
            time = time.with(OneDark::BLUE).to_string();
            relative = relative.with(OneDark::COMMENT).to_string();
        } else if is_today {
            relative = format!("{relative} *").trim_start().to_string();
        }

        [dot, date, time, relative]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn print_body(&self, body: &str) {
        let rail = self.rail();
        if self.opts.use_color {
            let body = highlight_wikilinks(body);
            let (width, _) = termimad::terminal_size();
            let width = (width as usize).saturating_sub(2).max(20);
            let text = self.skin.text(&body, Some(width)).to_string();
            for line in text.lines() {
                println!("{rail} {line}");
            }
        } else {
            for line in body.lines() {
                println!("{rail} {line}");
            }
        }
    }
}

fn highlight_wikilinks(body: &str) -> String {
    WIKILINK.replace_all(body, "`[[$1]]`").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            reference_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ..Config::default()
        }
    }

    fn plain_renderer(config: &Config) -> Renderer {
        Renderer::new(RenderOptions { use_color: false }, config)
    }

    fn events(content: &str) -> Vec<TimelineEvent> {
        timeline_core::parse_block(content, timeline_core::SortDirection::Ascending).unwrap()
    }

    #[test]
    fn wikilinks_become_inline_code() {
        assert_eq!(
            highlight_wikilinks("- [[Trip notes]] and [[Budget]]"),
            "- `[[Trip notes]]` and `[[Budget]]`"
        );
        assert_eq!(highlight_wikilinks("[not a link]"), "[not a link]");
    }

    #[test]
    fn pixel_settings_map_to_glyphs() {
        let mut config = config();
        config.dot_size = 6;
        config.line_width = 1;
        config.item_spacing = 35;
        let style = TimelineStyle::from_config(&config);
        assert_eq!(style.dot, "•");
        assert_eq!(style.line, "│");
        assert_eq!(style.spacing, 3);

        let style = TimelineStyle::from_config(&Config::default());
        assert_eq!(style.dot, "●");
        assert_eq!(style.line, "┃");
        assert_eq!(style.spacing, 2);
    }

    #[test]
    fn plain_heading_has_date_time_and_relative_day() {
        let config = config();
        let renderer = plain_renderer(&config);
        let events = events("2024-03-04_09:30: Launch");
        assert_eq!(renderer.event_heading(&events[0]), "● 2024-03-04 09:30 (in 3 days)");
    }

    #[test]
    fn plain_heading_marks_today() {
        let config = config();
        let renderer = plain_renderer(&config);
        let events = events("2024-03-01: Today");
        assert_eq!(renderer.event_heading(&events[0]), "● 2024-03-01 (today) *");
    }

    #[test]
    fn heading_without_tooltip_omits_relative_day() {
        let config = Config {
            show_tooltip: false,
            ..config()
        };
        let renderer = plain_renderer(&config);
        let events = events("2024-02-28: Past");
        assert_eq!(renderer.event_heading(&events[0]), "● 2024-02-28");
    }
}
