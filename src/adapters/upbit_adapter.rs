//! Upbit public API market data adapter.
//!
//! Translates Upbit candle JSON into domain candles. Upbit returns candles
//! latest-first and caps a single page at 200; pagination cursors are the
//! caller's concern via the `to` parameter.

use crate::domain::candle::Candle;
use crate::domain::error::FearcrossError;
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDateTime;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.upbit.com/v1";

/// Maximum candles Upbit serves per request.
pub const MAX_PAGE_SIZE: usize = 200;

#[derive(Debug, Deserialize)]
struct UpbitCandle {
    candle_date_time_kst: String,
    opening_price: f64,
    high_price: f64,
    low_price: f64,
    trade_price: f64,
    candle_acc_trade_volume: f64,
}

pub struct UpbitAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl UpbitAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn get_candles(
        &self,
        url: &str,
        query: &[(&str, String)],
        market: &str,
    ) -> Result<Vec<Candle>, FearcrossError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| FearcrossError::Http { reason: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FearcrossError::HttpStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let payload: Vec<UpbitCandle> = response
            .json()
            .map_err(|e| FearcrossError::Http { reason: e.to_string() })?;

        payload
            .into_iter()
            .map(|c| to_candle(c, market))
            .collect()
    }
}

impl MarketDataPort for UpbitAdapter {
    fn fetch_daily(&self, market: &str, count: usize) -> Result<Vec<Candle>, FearcrossError> {
        let url = format!("{}/candles/days", self.base_url);
        let query = [
            ("market", market.to_string()),
            ("count", count.to_string()),
        ];
        self.get_candles(&url, &query, market)
    }

    fn fetch_minutes(
        &self,
        market: &str,
        unit: u32,
        count: usize,
        to: Option<&str>,
    ) -> Result<Vec<Candle>, FearcrossError> {
        let url = format!("{}/candles/minutes/{}", self.base_url, unit);
        let mut query = vec![
            ("market", market.to_string()),
            ("count", count.to_string()),
        ];
        if let Some(cursor) = to {
            query.push(("to", cursor.to_string()));
        }
        self.get_candles(&url, &query, market)
    }
}

fn to_candle(raw: UpbitCandle, market: &str) -> Result<Candle, FearcrossError> {
    let timestamp = NaiveDateTime::parse_from_str(&raw.candle_date_time_kst, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| FearcrossError::Http {
            reason: format!("bad candle timestamp {:?}: {}", raw.candle_date_time_kst, e),
        })?;

    Ok(Candle {
        market: market.to_string(),
        timestamp,
        open: raw.opening_price,
        high: raw.high_price,
        low: raw.low_price,
        close: raw.trade_price,
        volume: raw.candle_acc_trade_volume,
    })
}

/// Cursor string for the next page: the oldest timestamp of the previous
/// page, in the format Upbit's `to` parameter expects.
pub fn page_cursor(page: &[Candle]) -> Option<String> {
    page.iter()
        .map(|c| c.timestamp)
        .min()
        .map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string())
}
