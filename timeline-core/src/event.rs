use chrono::{NaiveDate, NaiveDateTime};

use crate::date_time::{DateGrammar, TIME_SEPARATOR, localized_parts};
use crate::relative::{RelativeDay, days_between};

/// A dated event read from a timeline block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEvent {
    pub instant: NaiveDateTime,
    /// Normalized date text (see [`crate::date_time::ParsedDateTime::display`]).
    pub display: String,
    /// The exact substring that was recognized as the date.
    pub original: String,
    pub grammar: DateGrammar,
    /// Markdown body, never empty.
    pub body: String,
}

/// What a renderer shows in the date column: a date and an optional second line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayParts {
    pub date: String,
    pub time: Option<String>,
}

impl TimelineEvent {
    pub fn display_parts(&self) -> DisplayParts {
        let (date, time) = match self.grammar {
            DateGrammar::LocalizedWithPeriod | DateGrammar::LocalizedDate => {
                match localized_parts(&self.display) {
                    Some((date, suffix)) => (date, Some(suffix)),
                    None => (self.display.clone(), None),
                }
            }
            DateGrammar::PreciseDateTime => match self.display.split_once(TIME_SEPARATOR) {
                Some((date, time)) => (date.to_string(), Some(time.to_string())),
                None => (self.display.clone(), None),
            },
            DateGrammar::IsoDate => (self.display.clone(), None),
        };
        DisplayParts {
            date,
            time: time.filter(|t| !t.is_empty()),
        }
    }

    /// Position of the event relative to `today`, ignoring the time of day.
    pub fn relative_to(&self, today: NaiveDate) -> RelativeDay {
        RelativeDay::from_days(days_between(today, self.instant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_time::parse_date_time;

    fn event(token: &str) -> TimelineEvent {
        let parsed = parse_date_time(token).unwrap();
        TimelineEvent {
            instant: parsed.instant,
            display: parsed.display,
            original: token.to_string(),
            grammar: parsed.grammar,
            body: "body".to_string(),
        }
    }

    #[test]
    fn localized_display_splits_off_the_period() {
        let parts = event("2024年3月1日下午").display_parts();
        assert_eq!(parts.date, "2024-03-01");
        assert_eq!(parts.time.as_deref(), Some("下午"));
    }

    #[test]
    fn localized_without_suffix_has_no_time_line() {
        let parts = event("2024年3月1日").display_parts();
        assert_eq!(parts.date, "2024-03-01");
        assert_eq!(parts.time, None);
    }

    #[test]
    fn precise_display_splits_at_separator() {
        let parts = event("2024-3-1_9:30").display_parts();
        assert_eq!(parts.date, "2024-03-01");
        assert_eq!(parts.time.as_deref(), Some("09:30"));
    }

    #[test]
    fn iso_display_is_date_only() {
        let parts = event("2024-3-1").display_parts();
        assert_eq!(parts.date, "2024-03-01");
        assert_eq!(parts.time, None);
    }

    #[test]
    fn relative_to_ignores_time_of_day() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(event("2024-03-01_23:59").relative_to(today), RelativeDay::Today);
        assert_eq!(event("2024-03-04").relative_to(today), RelativeDay::DaysAhead(3));
        assert_eq!(event("2024年2月28日晚上").relative_to(today), RelativeDay::DaysAgo(2));
    }
}
