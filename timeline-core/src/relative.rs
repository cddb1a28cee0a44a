use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Whole days from `today` to the day of `instant`.
///
/// Both sides are floored to midnight first, so the time of day never changes
/// the result. Positive values are in the future.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use timeline_core::relative::days_between;
/// let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
/// let event = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap().and_hms_opt(20, 0, 0).unwrap();
///
/// assert_eq!(days_between(today, event), 2);
/// ```
pub fn days_between(today: NaiveDate, instant: NaiveDateTime) -> i64 {
    (instant.date() - today).num_days()
}

/// How a day difference reads in a tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    DaysAhead(i64),
    DaysAgo(i64),
}

impl RelativeDay {
    pub fn from_days(days: i64) -> Self {
        match days {
            0 => RelativeDay::Today,
            d if d > 0 => RelativeDay::DaysAhead(d),
            d => RelativeDay::DaysAgo(d.abs()),
        }
    }

    pub fn is_today(self) -> bool {
        self == RelativeDay::Today
    }
}

impl fmt::Display for RelativeDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RelativeDay::Today => write!(f, "today"),
            RelativeDay::DaysAhead(1) => write!(f, "in 1 day"),
            RelativeDay::DaysAhead(n) => write!(f, "in {n} days"),
            RelativeDay::DaysAgo(1) => write!(f, "1 day ago"),
            RelativeDay::DaysAgo(n) => write!(f, "{n} days ago"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn same_day_is_zero_whatever_the_hour() {
        let today = d(2025, 8, 15);
        assert_eq!(days_between(today, today.and_hms_opt(0, 0, 0).unwrap()), 0);
        assert_eq!(days_between(today, today.and_hms_opt(23, 59, 0).unwrap()), 0);
    }

    #[test]
    fn past_and_future_days() {
        let today = d(2025, 8, 15);
        assert_eq!(days_between(today, d(2025, 8, 14).and_hms_opt(23, 0, 0).unwrap()), -1);
        assert_eq!(days_between(today, d(2026, 8, 15).and_hms_opt(1, 0, 0).unwrap()), 365);
    }

    #[test]
    fn from_days_uses_absolute_value_for_the_past() {
        assert_eq!(RelativeDay::from_days(0), RelativeDay::Today);
        assert_eq!(RelativeDay::from_days(4), RelativeDay::DaysAhead(4));
        assert_eq!(RelativeDay::from_days(-4), RelativeDay::DaysAgo(4));
    }

    #[test]
    fn display_wording() {
        assert_eq!(RelativeDay::Today.to_string(), "today");
        assert_eq!(RelativeDay::DaysAhead(1).to_string(), "in 1 day");
        assert_eq!(RelativeDay::DaysAhead(12).to_string(), "in 12 days");
        assert_eq!(RelativeDay::DaysAgo(1).to_string(), "1 day ago");
        assert_eq!(RelativeDay::DaysAgo(30).to_string(), "30 days ago");
    }
}
