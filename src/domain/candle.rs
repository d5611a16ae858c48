//! Price candle representation.

use chrono::NaiveDateTime;

/// One OHLCV candle for a fixed trading period, timestamps in market-local
/// time (KST for Upbit markets).
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub market: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}
