//! Parses the text of a timeline block into dated `TimelineEvent`s.
//!
//! A block is read line by line. A line is either blank, a dated line or plain
//! text. Dated lines come in two shapes:
//!
//! - inline: `DATE: text`, `DATE：text` or `DATE  text` (two spaces);
//! - header: a line that is only `DATE`, followed by body lines.
//!
//! Text lines belong to the closest dated line above them.

use crate::config::SortDirection;
use crate::date_time::{ParsedDateTime, parse_date_time};
use crate::event::TimelineEvent;
use thiserror::Error;

/// Separators between an inline date and its text.
const INLINE_SEPARATORS: [&str; 3] = ["  ", "：", ":"];

/// Line shapes recognized as events, for error messages.
pub const ACCEPTED_SYNTAXES: [&str; 3] = [
    "DATE: text (half- or full-width colon)",
    "DATE  text (two spaces)",
    "DATE alone on a line, followed by the body lines",
];

/// Characters allowed on the date side of an inline separator.
fn is_inline_date_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '_' | '-' | '.' | ':')
        || ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BlockError {
    /// The block has text, but no line of it starts a non-empty event.
    #[error("no dated events found in the timeline block")]
    NoEvents,
}

/// A line that opens an event.
#[derive(Debug)]
struct DatedLine<'a> {
    date: ParsedDateTime,
    token: &'a str,
    inline: &'a str,
}

enum LineKind<'a> {
    Blank,
    Dated(DatedLine<'a>),
    Text,
}

/// Attempts to read a trimmed, non-blank line as a dated line, in priority order.
const CLASSIFIERS: [fn(&str) -> Option<DatedLine<'_>>; 2] = [inline_event, header_event];

enum ScanState<'a> {
    NoOpenEvent,
    AccumulatingBody(OpenEvent<'a>),
}

struct OpenEvent<'a> {
    date: ParsedDateTime,
    token: &'a str,
    body: Vec<&'a str>,
}

/// Parses a timeline block.
///
/// # Arguments
///
/// * `content` - The raw text of the block.
/// * `direction` - Order of the returned events. Events on the same instant
///   keep the order in which they appear in `content`.
///
/// # Returns
///
/// The events sorted by instant. Blank input gives an empty `Vec`; any other
/// input that yields no event gives [`BlockError::NoEvents`]. A dated line
/// with nothing inline and no body before the next dated line is dropped.
///
/// # Examples
///
/// ```
/// # use timeline_core::config::SortDirection;
/// # use timeline_core::parse_block::parse_block;
/// let block = "2024-03-02: Second\n2024-03-01\nFirst line\nSecond line";
/// let events = parse_block(block, SortDirection::Ascending).unwrap();
///
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[0].body, "First line\nSecond line");
/// assert_eq!(events[1].body, "Second");
/// ```
pub fn parse_block(
    content: &str,
    direction: SortDirection,
) -> Result<Vec<TimelineEvent>, BlockError> {
    let mut events = Vec::new();
    let mut state = ScanState::NoOpenEvent;

    for line in content.lines() {
        state = match (state, classify(line)) {
            (ScanState::AccumulatingBody(mut open), LineKind::Blank | LineKind::Text) => {
                open.body.push(line);
                ScanState::AccumulatingBody(open)
            }
            (ScanState::NoOpenEvent, LineKind::Text) => {
                tracing::trace!("ignoring text before the first date: {line:?}");
                ScanState::NoOpenEvent
            }
            (ScanState::NoOpenEvent, LineKind::Blank) => ScanState::NoOpenEvent,
            (previous, LineKind::Dated(dated)) => {
                if let ScanState::AccumulatingBody(open) = previous {
                    events.extend(open.close());
                }
                ScanState::AccumulatingBody(OpenEvent::start(dated))
            }
        };
    }
    if let ScanState::AccumulatingBody(open) = state {
        events.extend(open.close());
    }

    match direction {
        SortDirection::Ascending => events.sort_by(|a, b| a.instant.cmp(&b.instant)),
        SortDirection::Descending => events.sort_by(|a, b| b.instant.cmp(&a.instant)),
    }

    if events.is_empty() && !content.trim().is_empty() {
        tracing::debug!("timeline block has text but no events");
        return Err(BlockError::NoEvents);
    }
    tracing::debug!("parsed {} timeline events", events.len());
    Ok(events)
}

impl<'a> OpenEvent<'a> {
    fn start(dated: DatedLine<'a>) -> Self {
        let body = if dated.inline.is_empty() {
            Vec::new()
        } else {
            vec![dated.inline]
        };
        Self {
            date: dated.date,
            token: dated.token,
            body,
        }
    }

    /// Finishes the event; `None` when nothing but whitespace was collected.
    fn close(self) -> Option<TimelineEvent> {
        let body = self.body.join("\n").trim().to_string();
        if body.is_empty() {
            tracing::debug!("dropping `{}`: event has no body", self.token);
            return None;
        }
        Some(TimelineEvent {
            instant: self.date.instant,
            display: self.date.display,
            original: self.token.to_string(),
            grammar: self.date.grammar,
            body,
        })
    }
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    CLASSIFIERS
        .iter()
        .find_map(|classifier| classifier(trimmed))
        .map_or(LineKind::Text, LineKind::Dated)
}

/// `DATE: text`, `DATE：text` or `DATE  text`.
///
/// Separators are tried from left to right and the first one whose left side
/// is a date wins, so colons inside the text or inside a time never hide the date.
/// This is the leftmost split, where a greedy `DATE:` pattern would take the last
/// colon and reject `2024-01-05: Meeting: notes`.
fn inline_event(line: &str) -> Option<DatedLine<'_>> {
    // No split past the first character outside the date alphabet can succeed.
    let date_end = line
        .char_indices()
        .find(|&(_, c)| !is_inline_date_char(c))
        .map_or(line.len(), |(i, _)| i);

    line.char_indices()
        .take_while(|&(i, _)| i <= date_end)
        .filter(|&(i, _)| i > 0)
        .find_map(|(i, _)| {
            let rest = &line[i..];
            let separator = INLINE_SEPARATORS
                .iter()
                .find(|separator| rest.starts_with(**separator))?;
            let token = line[..i].trim();
            let date = parse_date_time(token)?;
            Some(DatedLine {
                date,
                token,
                inline: rest[separator.len()..].trim(),
            })
        })
}

/// A line that is nothing but a date.
fn header_event(line: &str) -> Option<DatedLine<'_>> {
    parse_date_time(line).map(|date| DatedLine {
        date,
        token: line,
        inline: "",
    })
}
