//! Domain error types.

/// Top-level error type for fearcross.
///
/// Degraded-but-representable states (MA warmup, missing sentiment) are not
/// errors; they are carried as `CrossState`/`SentimentReading` variants and
/// flow through the classifier.
#[derive(Debug, thiserror::Error)]
pub enum FearcrossError {
    #[error("no candle data for {market}")]
    EmptySeries { market: String },

    #[error("http request failed: {reason}")]
    Http { reason: String },

    #[error("unexpected http status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("store error: {reason}")]
    Store { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FearcrossError> for std::process::ExitCode {
    fn from(err: &FearcrossError) -> Self {
        let code: u8 = match err {
            FearcrossError::Io(_) => 1,
            FearcrossError::ConfigParse { .. }
            | FearcrossError::ConfigMissing { .. }
            | FearcrossError::ConfigInvalid { .. } => 2,
            FearcrossError::Store { .. } => 3,
            FearcrossError::Http { .. } | FearcrossError::HttpStatus { .. } => 4,
            FearcrossError::EmptySeries { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = FearcrossError::EmptySeries { market: "KRW-BTC".into() };
        assert_eq!(err.to_string(), "no candle data for KRW-BTC");

        let err = FearcrossError::ConfigMissing {
            section: "market".into(),
            key: "name".into(),
        };
        assert_eq!(err.to_string(), "missing config key [market] name");
    }
}
