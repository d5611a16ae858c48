//! Analysis run orchestration: series → averages → cross → signal.
//!
//! Pure pipeline over already-materialized inputs. Adapters fetch; this
//! module never performs I/O.

use crate::domain::candle::Candle;
use crate::domain::cross::{detect_cross, CrossState};
use crate::domain::error::FearcrossError;
use crate::domain::moving_average::compute_moving_averages;
use crate::domain::sentiment::SentimentReading;
use crate::domain::series::CandleSeries;
use crate::domain::signal::{classify, TradingSignal};
use chrono::{Local, NaiveDateTime};

pub const DEFAULT_SHORT_WINDOW: usize = 60;
pub const DEFAULT_LONG_WINDOW: usize = 120;

/// One complete analysis result, the sole contract handed to presentation.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub run_timestamp: NaiveDateTime,
    pub market: String,
    pub latest_price: f64,
    pub latest_date: NaiveDateTime,
    pub cross: CrossState,
    pub sentiment: SentimentReading,
    pub signal: TradingSignal,
    pub data_source: String,
}

/// Runs the full pipeline over candle batches and a normalized sentiment
/// reading. Fails only when no candles are available at all; every other
/// degraded input still yields a structured result.
pub fn analyze(
    batches: Vec<Vec<Candle>>,
    sentiment: SentimentReading,
    market: &str,
    data_source: &str,
    short_window: usize,
    long_window: usize,
) -> Result<AnalysisResult, FearcrossError> {
    let series = CandleSeries::build(batches, market)?;
    let frame = compute_moving_averages(&series, short_window, long_window);
    let cross = detect_cross(&frame);
    let signal = classify(&cross, &sentiment);

    let latest = series.latest();
    Ok(AnalysisResult {
        run_timestamp: Local::now().naive_local(),
        market: market.to_string(),
        latest_price: latest.close,
        latest_date: latest.timestamp,
        cross,
        sentiment,
        signal,
        data_source: data_source.to_string(),
    })
}
