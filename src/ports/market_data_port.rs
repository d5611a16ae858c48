//! Market data access port trait.

use crate::domain::candle::Candle;
use crate::domain::error::FearcrossError;

/// Supplies price candles for a market symbol. Implementations translate
/// wire formats only; ordering and deduplication are the core's job.
pub trait MarketDataPort {
    /// Most recent `count` daily candles, source ordering.
    fn fetch_daily(&self, market: &str, count: usize) -> Result<Vec<Candle>, FearcrossError>;

    /// Most recent `count` minute candles of the given unit (1, 5, ...),
    /// ending at the cursor `to` (market-local "YYYY-MM-DDTHH:MM:SS") when
    /// given, source ordering.
    fn fetch_minutes(
        &self,
        market: &str,
        unit: u32,
        count: usize,
        to: Option<&str>,
    ) -> Result<Vec<Candle>, FearcrossError>;
}
