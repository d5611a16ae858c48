//! Candle series assembly: concatenate, dedupe, sort.

use crate::domain::candle::Candle;
use crate::domain::error::FearcrossError;
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// Ordered candle sequence. Invariant: strictly increasing timestamps,
/// no duplicates.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Builds a series from one or more fetched/loaded batches. Batches may
    /// overlap (paginated fetches, adjacent store partitions); duplicates are
    /// resolved by keeping the first candle encountered for a timestamp.
    pub fn build(batches: Vec<Vec<Candle>>, market: &str) -> Result<Self, FearcrossError> {
        let mut seen: HashSet<NaiveDateTime> = HashSet::new();
        let mut candles: Vec<Candle> = Vec::new();

        for batch in batches {
            for candle in batch {
                if seen.insert(candle.timestamp) {
                    candles.push(candle);
                }
            }
        }

        if candles.is_empty() {
            return Err(FearcrossError::EmptySeries {
                market: market.to_string(),
            });
        }

        candles.sort_by_key(|c| c.timestamp);
        Ok(Self { candles })
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn latest(&self) -> &Candle {
        // Non-empty by construction.
        self.candles.last().unwrap()
    }
}
