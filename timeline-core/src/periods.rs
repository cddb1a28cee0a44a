use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};

/// Time-of-day words understood after a localized date (e.g. `2024年3月1日下午`).
///
/// The declaration order is the lookup order: when a suffix contains more than
/// one word, the first variant listed here wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum TimePeriod {
    #[strum(serialize = "早上")]
    EarlyMorning,
    #[strum(serialize = "上午")]
    LateMorning,
    #[strum(serialize = "中午")]
    Noon,
    #[strum(serialize = "下午")]
    Afternoon,
    #[strum(serialize = "晚上")]
    Evening,
}

impl TimePeriod {
    /// Representative hour used for the event instant.
    pub fn hour(self) -> u32 {
        match self {
            TimePeriod::EarlyMorning => 7,
            TimePeriod::LateMorning => 10,
            TimePeriod::Noon => 12,
            TimePeriod::Afternoon => 15,
            TimePeriod::Evening => 20,
        }
    }

    /// Returns the first period word contained anywhere in `text`.
    pub fn find_in(text: &str) -> Option<Self> {
        Self::iter().find(|period| text.contains(period.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_word_maps_to_its_hour() {
        let hours: Vec<(String, u32)> = TimePeriod::iter()
            .map(|p| (p.as_ref().to_string(), p.hour()))
            .collect();
        assert_eq!(
            hours,
            vec![
                ("早上".to_string(), 7),
                ("上午".to_string(), 10),
                ("中午".to_string(), 12),
                ("下午".to_string(), 15),
                ("晚上".to_string(), 20),
            ]
        );
    }

    #[test]
    fn find_in_matches_inside_longer_text() {
        assert_eq!(TimePeriod::find_in("下午三点"), Some(TimePeriod::Afternoon));
        assert_eq!(TimePeriod::find_in(" 晚上 "), Some(TimePeriod::Evening));
    }

    #[test]
    fn find_in_prefers_declaration_order() {
        assert_eq!(
            TimePeriod::find_in("晚上或者早上"),
            Some(TimePeriod::EarlyMorning)
        );
    }

    #[test]
    fn unknown_text_has_no_period() {
        assert_eq!(TimePeriod::find_in("morning"), None);
        assert_eq!(TimePeriod::find_in(""), None);
    }
}
