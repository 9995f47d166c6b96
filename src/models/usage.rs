//! Usage record data model.
//!
//! One measurement of a tracked document's state at a point in time. Field
//! names on the wire are fixed by the collection endpoint and differ from
//! the Rust names.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single word-count measurement, as shipped to the collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    #[serde(rename = "WordCount")]
    pub word_count: u64,
    #[serde(rename = "LanguageID")]
    pub language_id: String,
    #[serde(rename = "CharCount")]
    pub char_count: u64,
    #[serde(rename = "TimeStamp", with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "FilenameHash")]
    pub filename_hash: String,
    /// Empty at creation; stamped from configuration when the batch is sent.
    #[serde(rename = "UserID", default)]
    pub user_id: String,
}

/// Formats a timestamp the way it appears on the wire and in the status bar:
/// RFC 3339 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod iso_millis {
    use super::format_timestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(timestamp))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
