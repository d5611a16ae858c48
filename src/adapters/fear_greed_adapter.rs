//! alternative.me fear & greed index adapter.

use crate::domain::error::FearcrossError;
use crate::domain::sentiment::RawSentiment;
use crate::ports::sentiment_port::SentimentPort;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api.alternative.me/fng/";

#[derive(Debug, Deserialize)]
struct FngResponse {
    data: Vec<RawSentiment>,
}

pub struct FearGreedAdapter {
    client: reqwest::blocking::Client,
    api_url: String,
}

impl FearGreedAdapter {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_url: api_url.into(),
        }
    }
}

impl SentimentPort for FearGreedAdapter {
    fn fetch_latest(&self) -> Result<Option<RawSentiment>, FearcrossError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("limit", "1")])
            .send()
            .map_err(|e| FearcrossError::Http { reason: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FearcrossError::HttpStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let payload: FngResponse = response
            .json()
            .map_err(|e| FearcrossError::Http { reason: e.to_string() })?;

        Ok(payload.data.into_iter().next())
    }
}
