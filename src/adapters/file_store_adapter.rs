//! Filesystem partition store adapter.
//!
//! Hive-style partition layout under a base directory, one record per
//! partition file:
//!
//! - `daily_market_data/year=YYYY/month=MM/day=DD/data.csv`
//! - `market_5m/year=YYYY/month=MM/day=DD/hour=HH/minute=MM/data.csv`
//! - `fear_and_greed_index/year=YYYY/month=MM/day=DD/data.csv`

use crate::domain::candle::Candle;
use crate::domain::error::FearcrossError;
use crate::domain::sentiment::RawSentiment;
use crate::ports::store_port::StorePort;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::fs;
use std::path::{Path, PathBuf};

const CANDLE_HEADER: [&str; 7] = [
    "market", "timestamp", "open", "high", "low", "close", "volume",
];
const SENTIMENT_HEADER: [&str; 3] = ["value", "value_classification", "timestamp"];

pub struct FileStoreAdapter {
    base_path: PathBuf,
}

impl FileStoreAdapter {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    pub fn daily_path(&self, date: NaiveDate) -> PathBuf {
        self.base_path
            .join("daily_market_data")
            .join(date_partition(date))
            .join("data.csv")
    }

    pub fn minute_path(&self, timestamp: NaiveDateTime) -> PathBuf {
        self.base_path
            .join("market_5m")
            .join(date_partition(timestamp.date()))
            .join(format!("hour={:02}", timestamp.hour()))
            .join(format!("minute={:02}", timestamp.minute()))
            .join("data.csv")
    }

    pub fn sentiment_path(&self, date: NaiveDate) -> PathBuf {
        self.base_path
            .join("fear_and_greed_index")
            .join(date_partition(date))
            .join("data.csv")
    }

    fn write_candle(&self, path: &Path, candle: &Candle) -> Result<(), FearcrossError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
        writer.write_record(CANDLE_HEADER).map_err(csv_error)?;
        writer
            .write_record(&[
                candle.market.clone(),
                candle.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
                candle.open.to_string(),
                candle.high.to_string(),
                candle.low.to_string(),
                candle.close.to_string(),
                candle.volume.to_string(),
            ])
            .map_err(csv_error)?;
        writer.flush()?;
        Ok(())
    }

    fn read_candle(&self, path: &Path) -> Result<Option<Candle>, FearcrossError> {
        if !path.exists() {
            return Ok(None);
        }

        let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
        let Some(record) = reader.records().next() else {
            return Ok(None);
        };
        let record = record.map_err(csv_error)?;

        let field = |i: usize, name: &str| -> Result<String, FearcrossError> {
            record
                .get(i)
                .map(str::to_string)
                .ok_or_else(|| FearcrossError::Store {
                    reason: format!("missing {} column in {}", name, path.display()),
                })
        };
        let number = |i: usize, name: &str| -> Result<f64, FearcrossError> {
            field(i, name)?.parse().map_err(|e| FearcrossError::Store {
                reason: format!("invalid {} in {}: {}", name, path.display(), e),
            })
        };

        let timestamp =
            NaiveDateTime::parse_from_str(&field(1, "timestamp")?, "%Y-%m-%dT%H:%M:%S").map_err(
                |e| FearcrossError::Store {
                    reason: format!("invalid timestamp in {}: {}", path.display(), e),
                },
            )?;

        Ok(Some(Candle {
            market: field(0, "market")?,
            timestamp,
            open: number(2, "open")?,
            high: number(3, "high")?,
            low: number(4, "low")?,
            close: number(5, "close")?,
            volume: number(6, "volume")?,
        }))
    }
}

impl StorePort for FileStoreAdapter {
    fn read_daily(&self, date: NaiveDate) -> Result<Option<Candle>, FearcrossError> {
        self.read_candle(&self.daily_path(date))
    }

    fn write_daily(&self, candle: &Candle) -> Result<(), FearcrossError> {
        self.write_candle(&self.daily_path(candle.timestamp.date()), candle)
    }

    fn write_minute(&self, candle: &Candle) -> Result<(), FearcrossError> {
        self.write_candle(&self.minute_path(candle.timestamp), candle)
    }

    fn read_sentiment(&self, date: NaiveDate) -> Result<Option<RawSentiment>, FearcrossError> {
        let path = self.sentiment_path(date);
        if !path.exists() {
            return Ok(None);
        }

        let mut reader = csv::Reader::from_path(&path).map_err(csv_error)?;
        let Some(record) = reader.records().next() else {
            return Ok(None);
        };
        let record = record.map_err(csv_error)?;

        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        Ok(Some(RawSentiment {
            value: field(0),
            classification: field(1),
            timestamp: field(2),
        }))
    }

    fn write_sentiment(
        &self,
        raw: &RawSentiment,
        date: NaiveDate,
    ) -> Result<(), FearcrossError> {
        let path = self.sentiment_path(date);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(&path).map_err(csv_error)?;
        writer.write_record(SENTIMENT_HEADER).map_err(csv_error)?;
        writer
            .write_record(&[
                raw.value.clone(),
                raw.classification.clone(),
                raw.timestamp.clone(),
            ])
            .map_err(csv_error)?;
        writer.flush()?;
        Ok(())
    }
}

fn date_partition(date: NaiveDate) -> PathBuf {
    PathBuf::from(format!("year={}", date.year()))
        .join(format!("month={:02}", date.month()))
        .join(format!("day={:02}", date.day()))
}

fn csv_error(e: csv::Error) -> FearcrossError {
    FearcrossError::Store { reason: e.to_string() }
}
