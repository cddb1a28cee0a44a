//! Builds timeline text from notes grouped by a date attribute.
//!
//! Output, one group per day:
//!
//! ```text
//! 2024-03-01␠␠
//! - [[First note]]
//! - [[Second note]]
//!
//! ```
//!
//! The date line ends with two spaces so the text is itself a valid timeline block.

use crate::config::SortDirection;
use crate::fences::TIMELINE_TAG;
use crate::notes::NoteSource;
use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Accepted date-time shapes for a note's attribute, after cutting at `_`.
const NOTE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

static RANGE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid range date regex"));

/// An inclusive range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("expected a date range like YYYY-MM-DD,YYYY-MM-DD")]
    Shape,
    #[error("`{0}` is not a valid YYYY-MM-DD date")]
    InvalidDate(String),
    #[error("range starts on {start} after it ends on {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    /// Parses `YYYY-MM-DD,YYYY-MM-DD`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chrono::NaiveDate;
    /// # use timeline_core::aggregate::DateRange;
    /// let range = DateRange::parse("2024-03-01, 2024-03-31").unwrap();
    /// assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    /// assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    ///
    /// assert!(DateRange::parse("2024-3-1,2024-03-31").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, RangeError> {
        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        let [start, end] = parts.as_slice() else {
            return Err(RangeError::Shape);
        };
        let start = parse_range_date(start)?;
        let end = parse_range_date(end)?;
        if start > end {
            return Err(RangeError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// First to last day of the month containing `today`.
    pub fn current_month(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(today);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

fn parse_range_date(s: &str) -> Result<NaiveDate, RangeError> {
    if !RANGE_DATE.is_match(s) {
        return Err(RangeError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RangeError::InvalidDate(s.to_string()))
}

/// Reads the calendar day out of a note's date attribute.
///
/// Anything after the first `_` is ignored (`2024-03-01_14:30` is March 1st).
/// Accepts `YYYY-MM-DD`, date-times with `T` or a space, and RFC 3339.
pub fn parse_note_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let value = value.split('_').next().unwrap_or(value);
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.date_naive());
    }
    NOTE_DATE_TIME_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|date_time| date_time.date())
        .next()
}

/// A note that was left out of the aggregation.
#[derive(Debug)]
pub enum AggregateError {
    InvalidDate { note: PathBuf, value: String },
    FileError { path: PathBuf, error: anyhow::Error },
}

/// The aggregated timeline text and the notes that were skipped.
#[derive(Debug)]
pub struct AggregateResult {
    /// Empty when no note falls inside the range.
    pub timeline: String,
    pub note_count: usize,
    pub errors: Vec<AggregateError>,
}

/// Groups the notes of `source` by the day stored in `field`.
///
/// Notes without the attribute are ignored. Unreadable notes and values that
/// are not dates are reported in [`AggregateResult::errors`] and never stop
/// the aggregation.
pub fn aggregate_notes(
    source: &impl NoteSource,
    field: &str,
    range: DateRange,
    direction: SortDirection,
) -> AggregateResult {
    let scan = source.scan(field);
    let mut errors: Vec<AggregateError> = scan
        .errors
        .into_iter()
        .map(|e| AggregateError::FileError {
            path: e.path,
            error: e.error,
        })
        .collect();

    let mut by_day: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    let mut note_count = 0;
    for note in scan.notes {
        let Some(value) = note.date_value else {
            continue;
        };
        match parse_note_date(&value) {
            Some(date) if range.contains(date) => {
                by_day.entry(date).or_default().push(note.name);
                note_count += 1;
            }
            Some(_) => {}
            None => {
                tracing::warn!(
                    "skipping {}: `{field}` value `{value}` is not a date",
                    note.path.display()
                );
                errors.push(AggregateError::InvalidDate {
                    note: note.path,
                    value,
                });
            }
        }
    }

    AggregateResult {
        timeline: format_timeline(&by_day, direction),
        note_count,
        errors,
    }
}

/// Writes grouped note names as timeline text.
pub fn format_timeline(by_day: &BTreeMap<NaiveDate, Vec<String>>, direction: SortDirection) -> String {
    let groups: Box<dyn Iterator<Item = (&NaiveDate, &Vec<String>)>> = match direction {
        SortDirection::Ascending => Box::new(by_day.iter()),
        SortDirection::Descending => Box::new(by_day.iter().rev()),
    };
    let mut out = String::new();
    for (date, names) in groups.filter(|(_, names)| !names.is_empty()) {
        out.push_str(&format!("{}  \n", date.format("%Y-%m-%d")));
        for name in names {
            out.push_str(&format!("- [[{name}]]\n"));
        }
        out.push('\n');
    }
    out
}

/// Wraps timeline text in a ```` ```timeline ```` fence.
pub fn fence(content: &str) -> String {
    format!("```{TIMELINE_TAG}\n{content}```\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::{Note, NoteScan, ScanError};
    use crate::parse_block::parse_block;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    struct FakeNotes(Vec<(&'static str, Option<&'static str>)>);

    impl NoteSource for FakeNotes {
        fn scan(&self, _field: &str) -> NoteScan {
            NoteScan {
                notes: self
                    .0
                    .iter()
                    .map(|(name, value)| Note {
                        name: name.to_string(),
                        path: PathBuf::from(format!("{name}.md")),
                        date_value: value.map(str::to_string),
                    })
                    .collect(),
                errors: vec![ScanError {
                    path: PathBuf::from("broken.md"),
                    error: anyhow::anyhow!("unreadable"),
                }],
            }
        }
    }

    fn march() -> DateRange {
        DateRange::parse("2024-03-01,2024-03-31").unwrap()
    }

    #[test]
    fn range_parse_errors() {
        assert_eq!(DateRange::parse("2024-03-01"), Err(RangeError::Shape));
        assert_eq!(DateRange::parse("2024-03-01,2024-03-02,2024-03-03"), Err(RangeError::Shape));
        assert_eq!(
            DateRange::parse("2024-03-01,2024-02-30"),
            Err(RangeError::InvalidDate("2024-02-30".to_string()))
        );
        assert_eq!(
            DateRange::parse("2024-03-31,2024-03-01"),
            Err(RangeError::Reversed {
                start: d(2024, 3, 31),
                end: d(2024, 3, 1)
            })
        );
    }

    #[test]
    fn range_contains_both_ends() {
        let range = march();
        assert!(range.contains(d(2024, 3, 1)));
        assert!(range.contains(d(2024, 3, 31)));
        assert!(!range.contains(d(2024, 4, 1)));
        assert!(!range.contains(d(2024, 2, 29)));
        assert_eq!(range.to_string(), "2024-03-01,2024-03-31");
    }

    #[test]
    fn current_month_covers_whole_month() {
        assert_eq!(
            DateRange::current_month(d(2024, 2, 14)),
            DateRange {
                start: d(2024, 2, 1),
                end: d(2024, 2, 29)
            }
        );
        assert_eq!(
            DateRange::current_month(d(2024, 12, 31)),
            DateRange {
                start: d(2024, 12, 1),
                end: d(2024, 12, 31)
            }
        );
    }

    #[test]
    fn note_dates() {
        assert_eq!(parse_note_date("2024-03-01"), Some(d(2024, 3, 1)));
        assert_eq!(parse_note_date("2024-03-01_14:30"), Some(d(2024, 3, 1)));
        assert_eq!(parse_note_date("2024-03-01T14:30:00"), Some(d(2024, 3, 1)));
        assert_eq!(parse_note_date("2024-03-01 14:30"), Some(d(2024, 3, 1)));
        assert_eq!(parse_note_date("2024-03-01T23:30:00+02:00"), Some(d(2024, 3, 1)));
        assert_eq!(parse_note_date("yesterday"), None);
        assert_eq!(parse_note_date("2024-02-30"), None);
    }

    #[test]
    fn groups_by_day_inside_range() {
        let source = FakeNotes(vec![
            ("Kickoff", Some("2024-03-02_09:00")),
            ("Retro", Some("2024-03-15")),
            ("Plan", Some("2024-03-02")),
            ("Old", Some("2024-02-28")),
            ("Undated", None),
            ("Garbage", Some("soon")),
        ]);
        let result = aggregate_notes(&source, "created", march(), SortDirection::Ascending);

        assert_eq!(
            result.timeline,
            "2024-03-02  \n- [[Kickoff]]\n- [[Plan]]\n\n2024-03-15  \n- [[Retro]]\n\n"
        );
        assert_eq!(result.note_count, 3);
        assert_eq!(result.errors.len(), 2);
        assert!(matches!(&result.errors[0], AggregateError::FileError { .. }));
        assert!(matches!(
            &result.errors[1],
            AggregateError::InvalidDate { value, .. } if value == "soon"
        ));
    }

    #[test]
    fn descending_reverses_days_not_notes() {
        let source = FakeNotes(vec![
            ("A", Some("2024-03-01")),
            ("B", Some("2024-03-05")),
            ("C", Some("2024-03-01")),
        ]);
        let result = aggregate_notes(&source, "created", march(), SortDirection::Descending);
        assert_eq!(
            result.timeline,
            "2024-03-05  \n- [[B]]\n\n2024-03-01  \n- [[A]]\n- [[C]]\n\n"
        );
    }

    #[test]
    fn nothing_in_range_gives_empty_text() {
        let source = FakeNotes(vec![("A", Some("2023-01-01"))]);
        let result = aggregate_notes(&source, "created", march(), SortDirection::Ascending);
        assert!(result.timeline.is_empty());
        assert_eq!(result.note_count, 0);
    }

    #[test]
    fn aggregated_text_parses_as_a_timeline() {
        let source = FakeNotes(vec![
            ("Kickoff", Some("2024-03-02")),
            ("Plan", Some("2024-03-02")),
            ("Retro", Some("2024-03-15")),
        ]);
        let result = aggregate_notes(&source, "created", march(), SortDirection::Ascending);
        let events = parse_block(&result.timeline, SortDirection::Ascending).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].display, "2024-03-02");
        assert_eq!(events[0].body, "- [[Kickoff]]\n- [[Plan]]");
        assert_eq!(events[1].body, "- [[Retro]]");
    }

    #[test]
    fn fence_wraps_content() {
        assert_eq!(
            fence("2024-03-02  \n- [[A]]\n\n"),
            "```timeline\n2024-03-02  \n- [[A]]\n\n```\n"
        );
    }
}
