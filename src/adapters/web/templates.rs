//! HTML templates using Askama.

use askama::Template;

use crate::domain::analysis::AnalysisResult;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub market: String,
}

/// Flattened, display-ready view of an analysis result.
pub struct ResultView {
    pub market: String,
    pub run_timestamp: String,
    pub latest_price: String,
    pub latest_date: String,
    pub data_source: String,
    pub cross_state: String,
    pub short_ma: String,
    pub long_ma: String,
    pub sentiment: String,
    pub signal_label: String,
    pub strength: String,
    pub rationale: String,
}

impl From<&AnalysisResult> for ResultView {
    fn from(result: &AnalysisResult) -> Self {
        let (short_ma, long_ma) = match result.cross.ma_values() {
            Some((s, l)) => (format!("{s:.0}"), format!("{l:.0}")),
            None => ("-".to_string(), "-".to_string()),
        };
        let sentiment = match result.sentiment.value {
            Some(v) => format!("{v} ({})", result.sentiment.classification),
            None => "unavailable".to_string(),
        };

        Self {
            market: result.market.clone(),
            run_timestamp: result.run_timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            latest_price: format!("{:.0}", result.latest_price),
            latest_date: result.latest_date.format("%Y-%m-%d").to_string(),
            data_source: result.data_source.clone(),
            cross_state: result.cross.describe().to_string(),
            short_ma,
            long_ma,
            sentiment,
            signal_label: result.signal.label.clone(),
            strength: result.signal.strength.to_string(),
            rationale: result
                .signal
                .rationale
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub view: ResultView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

#[derive(Template)]
#[template(path = "base.html")]
pub struct BasePage<'a> {
    pub title: &'a str,
    pub content: &'a str,
}
