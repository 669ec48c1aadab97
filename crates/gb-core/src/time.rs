use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Deserializer, Serializer};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a content date. A bare `YYYY-MM-DD` means midnight.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// English name of a weekday, as content writes it.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Human-readable clock text, e.g. `Monday, October 12, 1925 09:00`.
pub fn format_date(date: NaiveDateTime) -> String {
    format!(
        "{}, {}",
        weekday_name(date.weekday()),
        date.format("%B %-d, %Y %H:%M")
    )
}

/// Serde adapter for optional content dates.
pub mod optional_date {
    use super::*;

    /// Serialize as `YYYY-MM-DDTHH:MM:SS`.
    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_some(&d.format(DATE_TIME_FORMATS[0]).to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize any format [`parse_date`] accepts.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|text| {
            parse_date(&text)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {text}")))
        })
        .transpose()
    }
}
