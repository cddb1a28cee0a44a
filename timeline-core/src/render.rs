//! HTML rendering of a parsed timeline block.
//!
//! Markup:
//!
//! ```text
//! div.timeline-container (style: --timeline-color, --dot-size, --line-width, --item-spacing)
//!   div.timeline-item
//!     div.timeline-date      date, newline, optional time text
//!     div.timeline-dot
//!     div.timeline-content   (+ .timeline-today)
//!       div.timeline-tooltip (data-delay in ms)
//!       body rendered from markdown
//! ```

use crate::config::Config;
use crate::event::TimelineEvent;
use crate::parse_block::{ACCEPTED_SYNTAXES, BlockError};
use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{Parser, html};

/// Renders the result of [`crate::parse_block::parse_block`].
///
/// A parse error becomes a `timeline-error` box listing the accepted line
/// shapes. An empty event list renders an empty container.
pub fn render_html(result: &Result<Vec<TimelineEvent>, BlockError>, config: &Config) -> String {
    let mut out = format!(
        "<div class=\"timeline-container\" style=\"{}\">\n",
        encode_double_quoted_attribute(&container_style(config))
    );
    match result {
        Ok(events) => {
            for event in events {
                out.push_str(&render_event(event, config));
            }
        }
        Err(error) => out.push_str(&render_error(error)),
    }
    out.push_str("</div>\n");
    out
}

fn container_style(config: &Config) -> String {
    format!(
        "--timeline-color: {}; --dot-size: {}px; --line-width: {}px; --item-spacing: {}px;",
        config.timeline_color, config.dot_size, config.line_width, config.item_spacing
    )
}

fn render_event(event: &TimelineEvent, config: &Config) -> String {
    let parts = event.display_parts();
    let date_text = match &parts.time {
        Some(time) => format!("{}\n{}", parts.date, time),
        None => parts.date.clone(),
    };
    let relative = event.relative_to(config.reference_date);

    let content_class = if relative.is_today() && config.highlight_today {
        "timeline-content timeline-today"
    } else {
        "timeline-content"
    };
    let tooltip = if config.show_tooltip {
        format!(
            "<div class=\"timeline-tooltip\" data-delay=\"{}\">{}</div>\n",
            config.tooltip_delay,
            encode_text(&relative.to_string())
        )
    } else {
        String::new()
    };

    format!(
        "<div class=\"timeline-item\">\n\
         <div class=\"timeline-date\">{}</div>\n\
         <div class=\"timeline-dot\"></div>\n\
         <div class=\"{content_class}\">\n\
         {tooltip}{}</div>\n\
         </div>\n",
        encode_text(&date_text),
        markdown_to_html(&event.body)
    )
}

fn render_error(error: &BlockError) -> String {
    let items: String = ACCEPTED_SYNTAXES
        .iter()
        .map(|syntax| format!("<li>{}</li>\n", encode_text(syntax)))
        .collect();
    format!(
        "<div class=\"timeline-error\">\n\
         <strong>Timeline parse error</strong>\n\
         <p>{}. Check that the lines follow one of these forms:</p>\n\
         <ul>\n{items}</ul>\n\
         </div>\n",
        encode_text(&capitalize(&error.to_string()))
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let mut html_output = String::new();
    html::push_html(&mut html_output, Parser::new(markdown));
    html_output
}
