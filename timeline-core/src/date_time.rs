//! Recognizes the date notations accepted on a timeline line.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::periods::TimePeriod;

/// Joins date and time of day in the precise notation (`2024-03-01_14:30`).
pub const TIME_SEPARATOR: char = '_';

static PRECISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})_([0-9]{1,2}):([0-9]{1,2})$")
        .expect("valid precise regex")
});
static LOCALIZED_WITH_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})年([0-9]{1,2})月([0-9]{1,2})日(.*)$").expect("valid localized regex")
});
static ISO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").expect("valid iso regex")
});
static LOCALIZED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})年([0-9]{1,2})月([0-9]{1,2})日$").expect("valid localized regex")
});

/// The date notations, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum DateGrammar {
    /// `2024-3-1_9:05`
    PreciseDateTime,
    /// `2024年3月1日` followed by anything, e.g. `2024年3月1日下午`
    LocalizedWithPeriod,
    /// `2024-3-1`
    IsoDate,
    /// `2024年3月1日` with nothing after the day marker
    LocalizedDate,
}

/// A recognized date token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDateTime {
    pub instant: NaiveDateTime,
    /// Normalized text shown to the user.
    pub display: String,
    pub grammar: DateGrammar,
}

/// Parses a date token using the first grammar that matches.
///
/// The token is trimmed before matching. Month, day, hour and minute take one
/// or two digits, the year exactly four. Values are not range checked: they
/// overflow into the next unit (month `13` is January of the following year).
///
/// # Returns
///
/// `None` when no grammar matches. This is the normal outcome for ordinary text.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use timeline_core::date_time::parse_date_time;
/// let parsed = parse_date_time("2024-3-1_9:05").unwrap();
/// assert_eq!(parsed.display, "2024-03-01_09:05");
/// assert_eq!(
///     parsed.instant,
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 5, 0).unwrap()
/// );
///
/// assert!(parse_date_time("next tuesday").is_none());
/// ```
pub fn parse_date_time(token: &str) -> Option<ParsedDateTime> {
    let token = token.trim();
    DateGrammar::iter().find_map(|grammar| grammar.parse(token))
}

impl DateGrammar {
    fn parse(self, token: &str) -> Option<ParsedDateTime> {
        match self {
            DateGrammar::PreciseDateTime => {
                let caps = PRECISE.captures(token)?;
                let (year, month, day) = ymd(&caps)?;
                let hour = number(&caps, 4)?;
                let minute = number(&caps, 5)?;
                Some(ParsedDateTime {
                    instant: lenient_date_time(year, month, day, hour, minute)?,
                    display: format!(
                        "{year:04}-{month:02}-{day:02}{TIME_SEPARATOR}{hour:02}:{minute:02}"
                    ),
                    grammar: self,
                })
            }
            DateGrammar::LocalizedWithPeriod => {
                let caps = LOCALIZED_WITH_SUFFIX.captures(token)?;
                let (year, month, day) = ymd(&caps)?;
                let hour = caps
                    .get(4)
                    .and_then(|suffix| TimePeriod::find_in(suffix.as_str().trim()))
                    .map_or(0, |period| i64::from(period.hour()));
                Some(ParsedDateTime {
                    instant: lenient_date_time(year, month, day, hour, 0)?,
                    display: token.to_string(),
                    grammar: self,
                })
            }
            DateGrammar::IsoDate => {
                let caps = ISO.captures(token)?;
                let (year, month, day) = ymd(&caps)?;
                Some(ParsedDateTime {
                    instant: lenient_date_time(year, month, day, 0, 0)?,
                    display: format!("{year:04}-{month:02}-{day:02}"),
                    grammar: self,
                })
            }
            DateGrammar::LocalizedDate => {
                let caps = LOCALIZED.captures(token)?;
                let (year, month, day) = ymd(&caps)?;
                Some(ParsedDateTime {
                    instant: lenient_date_time(year, month, day, 0, 0)?,
                    display: token.to_string(),
                    grammar: self,
                })
            }
        }
    }
}

/// Splits a localized display form into `YYYY-MM-DD` and its trimmed suffix.
///
/// Month and day are padded as written, without overflow normalization.
pub(crate) fn localized_parts(display: &str) -> Option<(String, String)> {
    let caps = LOCALIZED_WITH_SUFFIX.captures(display)?;
    let (year, month, day) = ymd(&caps)?;
    let suffix = caps.get(4).map_or("", |m| m.as_str()).trim().to_string();
    Some((format!("{year:04}-{month:02}-{day:02}"), suffix))
}

fn number(caps: &Captures, index: usize) -> Option<i64> {
    caps.get(index)?.as_str().parse().ok()
}

fn ymd(caps: &Captures) -> Option<(i64, i64, i64)> {
    Some((number(caps, 1)?, number(caps, 2)?, number(caps, 3)?))
}

/// Builds a local date-time, letting every component overflow into the next
/// larger one instead of rejecting it.
fn lenient_date_time(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
) -> Option<NaiveDateTime> {
    let months = year * 12 + month - 1;
    let first_of_month = NaiveDate::from_ymd_opt(
        i32::try_from(months.div_euclid(12)).ok()?,
        u32::try_from(months.rem_euclid(12) + 1).ok()?,
        1,
    )?;
    first_of_month.and_hms_opt(0, 0, 0)?.checked_add_signed(
        Duration::days(day - 1) + Duration::hours(hour) + Duration::minutes(minute),
    )
}
