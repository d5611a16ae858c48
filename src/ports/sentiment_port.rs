//! Sentiment index access port trait.

use crate::domain::error::FearcrossError;
use crate::domain::sentiment::RawSentiment;

/// Supplies the latest fear/greed style sentiment record. `Ok(None)` means
/// the source had no record; callers map both `Ok(None)` and `Err` to the
/// unknown reading at the boundary.
pub trait SentimentPort {
    fn fetch_latest(&self) -> Result<Option<RawSentiment>, FearcrossError>;
}
