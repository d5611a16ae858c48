#![allow(dead_code)]

use chrono::{Local, NaiveDate, NaiveDateTime};
use fearcross::domain::candle::Candle;
use fearcross::domain::error::FearcrossError;
use fearcross::domain::sentiment::RawSentiment;
use fearcross::ports::market_data_port::MarketDataPort;
use fearcross::ports::sentiment_port::SentimentPort;
use fearcross::ports::store_port::StorePort;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn timestamp(date: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub fn make_candle(market: &str, date: &str, close: f64) -> Candle {
    Candle {
        market: market.to_string(),
        timestamp: timestamp(date),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1.0,
    }
}

/// `len` daily candles with closes rising linearly from `start` to `end`,
/// newest dated today (so store walks find them).
pub fn ramp_ending_today(market: &str, len: usize, start: f64, end: f64) -> Vec<Candle> {
    let step = (end - start) / (len - 1) as f64;
    let today = Local::now().date_naive();
    (0..len)
        .map(|i| {
            let close = start + step * i as f64;
            Candle {
                market: market.to_string(),
                timestamp: (today - chrono::Duration::days((len - 1 - i) as i64))
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1.0,
            }
        })
        .collect()
}

/// `len` 5-minute candles ending now, latest-first like the exchange
/// serves them.
pub fn minute_ramp(market: &str, len: usize) -> Vec<Candle> {
    let now = Local::now().naive_local();
    (0..len)
        .map(|i| Candle {
            market: market.to_string(),
            timestamp: now - chrono::Duration::minutes(5 * i as i64),
            open: 100.0,
            high: 100.0,
            low: 100.0,
            close: 100.0,
            volume: 1.0,
        })
        .collect()
}

pub struct MockMarketPort {
    pub daily: Vec<Candle>,
    pub minutes: Vec<Candle>,
    pub fail_with: Option<String>,
}

impl MockMarketPort {
    pub fn new() -> Self {
        Self {
            daily: Vec::new(),
            minutes: Vec::new(),
            fail_with: None,
        }
    }

    pub fn with_daily(mut self, candles: Vec<Candle>) -> Self {
        self.daily = candles;
        self
    }

    pub fn with_minutes(mut self, candles: Vec<Candle>) -> Self {
        self.minutes = candles;
        self
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            daily: Vec::new(),
            minutes: Vec::new(),
            fail_with: Some(reason.to_string()),
        }
    }
}

impl MarketDataPort for MockMarketPort {
    fn fetch_daily(&self, _market: &str, count: usize) -> Result<Vec<Candle>, FearcrossError> {
        if let Some(reason) = &self.fail_with {
            return Err(FearcrossError::Http { reason: reason.clone() });
        }
        Ok(self.daily.iter().rev().take(count).rev().cloned().collect())
    }

    fn fetch_minutes(
        &self,
        _market: &str,
        _unit: u32,
        count: usize,
        to: Option<&str>,
    ) -> Result<Vec<Candle>, FearcrossError> {
        if let Some(reason) = &self.fail_with {
            return Err(FearcrossError::Http { reason: reason.clone() });
        }
        // Cursor semantics match the exchange: candles strictly older than
        // `to`, latest-first.
        let cutoff = to.map(|t| {
            NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M:%S").expect("bad cursor")
        });
        Ok(self
            .minutes
            .iter()
            .filter(|c| cutoff.is_none_or(|cut| c.timestamp < cut))
            .take(count)
            .cloned()
            .collect())
    }
}

pub struct MockSentimentPort {
    pub record: Option<RawSentiment>,
    pub fail_with: Option<String>,
}

impl MockSentimentPort {
    pub fn with_value(value: &str, classification: &str) -> Self {
        Self {
            record: Some(RawSentiment {
                value: value.to_string(),
                classification: classification.to_string(),
                timestamp: "1704067200".to_string(),
            }),
            fail_with: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            record: None,
            fail_with: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            record: None,
            fail_with: Some(reason.to_string()),
        }
    }
}

impl SentimentPort for MockSentimentPort {
    fn fetch_latest(&self) -> Result<Option<RawSentiment>, FearcrossError> {
        if let Some(reason) = &self.fail_with {
            return Err(FearcrossError::Http { reason: reason.clone() });
        }
        Ok(self.record.clone())
    }
}

pub struct MockStorePort {
    pub daily: HashMap<NaiveDate, Candle>,
    pub sentiment: HashMap<NaiveDate, RawSentiment>,
    fail_writes: bool,
    written_daily: Mutex<Vec<Candle>>,
    written_minutes: Mutex<Vec<Candle>>,
    written_sentiment: Mutex<Vec<(RawSentiment, NaiveDate)>>,
}

impl MockStorePort {
    pub fn new() -> Self {
        Self {
            daily: HashMap::new(),
            sentiment: HashMap::new(),
            fail_writes: false,
            written_daily: Mutex::new(Vec::new()),
            written_minutes: Mutex::new(Vec::new()),
            written_sentiment: Mutex::new(Vec::new()),
        }
    }

    /// Every write fails with a store error; reads keep working.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    pub fn with_daily_candles(mut self, candles: Vec<Candle>) -> Self {
        for candle in candles {
            self.daily.insert(candle.timestamp.date(), candle);
        }
        self
    }

    pub fn with_sentiment(mut self, date: NaiveDate, raw: RawSentiment) -> Self {
        self.sentiment.insert(date, raw);
        self
    }

    pub fn written_daily(&self) -> Vec<Candle> {
        self.written_daily.lock().unwrap().clone()
    }

    pub fn written_minutes(&self) -> Vec<Candle> {
        self.written_minutes.lock().unwrap().clone()
    }

    pub fn written_sentiment(&self) -> Vec<(RawSentiment, NaiveDate)> {
        self.written_sentiment.lock().unwrap().clone()
    }

    fn write_error(&self) -> FearcrossError {
        FearcrossError::Store {
            reason: "disk full".to_string(),
        }
    }
}

impl StorePort for MockStorePort {
    fn read_daily(&self, date: NaiveDate) -> Result<Option<Candle>, FearcrossError> {
        Ok(self.daily.get(&date).cloned())
    }

    fn write_daily(&self, candle: &Candle) -> Result<(), FearcrossError> {
        if self.fail_writes {
            return Err(self.write_error());
        }
        self.written_daily.lock().unwrap().push(candle.clone());
        Ok(())
    }

    fn write_minute(&self, candle: &Candle) -> Result<(), FearcrossError> {
        if self.fail_writes {
            return Err(self.write_error());
        }
        self.written_minutes.lock().unwrap().push(candle.clone());
        Ok(())
    }

    fn read_sentiment(&self, date: NaiveDate) -> Result<Option<RawSentiment>, FearcrossError> {
        Ok(self.sentiment.get(&date).cloned())
    }

    fn write_sentiment(
        &self,
        raw: &RawSentiment,
        date: NaiveDate,
    ) -> Result<(), FearcrossError> {
        if self.fail_writes {
            return Err(self.write_error());
        }
        self.written_sentiment
            .lock()
            .unwrap()
            .push((raw.clone(), date));
        Ok(())
    }
}
