//! Durable partition store port trait.

use crate::domain::candle::Candle;
use crate::domain::error::FearcrossError;
use crate::domain::sentiment::RawSentiment;
use chrono::NaiveDate;

/// Date-partitioned candle and sentiment store. A missing partition is
/// `Ok(None)`, identical to "no data for that period" — never an error.
pub trait StorePort {
    /// Daily candle for a calendar date.
    fn read_daily(&self, date: NaiveDate) -> Result<Option<Candle>, FearcrossError>;

    fn write_daily(&self, candle: &Candle) -> Result<(), FearcrossError>;

    /// Minute candle, partitioned down to hour and minute of its timestamp.
    fn write_minute(&self, candle: &Candle) -> Result<(), FearcrossError>;

    fn read_sentiment(&self, date: NaiveDate) -> Result<Option<RawSentiment>, FearcrossError>;

    fn write_sentiment(
        &self,
        raw: &RawSentiment,
        date: NaiveDate,
    ) -> Result<(), FearcrossError>;
}
