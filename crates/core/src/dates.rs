//! Calendar date handling for the wire format.
//!
//! The API stores dates as ISO-8601 timestamps at midnight UTC, while the
//! dashboard only ever cares about the calendar day. Everything inside the
//! crate uses [`NaiveDate`]; the helpers here convert at the boundary.

use chrono::NaiveDate;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a bare `YYYY-MM-DD` day or an ISO-8601 timestamp into a calendar day.
///
/// The time part (anything after `T` or a space) is discarded, so
/// `2024-03-01T00:00:00.000Z` and `2024-03-01` yield the same date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw
        .split_once(|c| c == 'T' || c == ' ')
        .map_or(raw, |(day, _)| day);
    NaiveDate::parse_from_str(day, DAY_FORMAT).ok()
}

/// Normalize any accepted date shape to a zero-padded `YYYY-MM-DD` string.
///
/// Lexicographic comparison of the result orders dates chronologically.
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|date| date.format(DAY_FORMAT).to_string())
}

/// Render a calendar day as the midnight-UTC timestamp the API expects.
pub fn to_wire(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format(DAY_FORMAT))
}

/// `#[serde(with = "...")]` adapter for [`NaiveDate`] fields.
pub mod wire {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_wire(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
    }
}
