//! Fear & greed index normalization.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

/// Sentiment record as delivered by alternative.me: every field arrives as a
/// string, including the 0-100 value and the epoch-second timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSentiment {
    pub value: String,
    #[serde(rename = "value_classification")]
    pub classification: String,
    pub timestamp: String,
}

/// Typed sentiment reading. `value: None` means the source was unreachable or
/// malformed; that is a degraded state the classifier must handle, never a
/// numeric default.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentReading {
    pub value: Option<u8>,
    pub classification: String,
    pub timestamp: Option<NaiveDateTime>,
}

impl SentimentReading {
    /// Coerces a raw payload into a typed reading. Absent or malformed input
    /// degrades to the unknown reading rather than failing.
    pub fn normalize(raw: Option<RawSentiment>) -> Self {
        let Some(raw) = raw else {
            return Self::unknown();
        };

        let Ok(value) = raw.value.trim().parse::<u8>() else {
            return Self::unknown();
        };
        if value > 100 {
            return Self::unknown();
        }

        let timestamp = raw
            .timestamp
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.naive_utc());

        Self {
            value: Some(value),
            classification: raw.classification,
            timestamp,
        }
    }

    pub fn unknown() -> Self {
        Self {
            value: None,
            classification: "Unknown".to_string(),
            timestamp: None,
        }
    }
}
