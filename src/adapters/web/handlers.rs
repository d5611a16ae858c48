//! HTTP request handlers for the web adapter.

use askama::Template;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Form,
};
use std::sync::Arc;

use crate::cli;

use super::templates::{BasePage, DashboardTemplate, ResultTemplate, ResultView};
use super::{is_htmx_request, AppState, WebError};

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let template = DashboardTemplate {
        market: state.settings.market.clone(),
    };
    Ok(template.into_response())
}

#[derive(Debug, serde::Deserialize)]
pub struct AnalyzeFormData {
    pub market: String,
    pub source: String,
}

pub async fn run_analysis(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<AnalyzeFormData>,
) -> Result<Response, WebError> {
    let market = form.market.trim().to_uppercase();
    if market.is_empty() {
        return Err(WebError::bad_request("No market specified"));
    }
    let use_store = match form.source.as_str() {
        "api" => false,
        "store" => true,
        other => {
            return Err(WebError::bad_request(format!("Unknown source {other:?}")));
        }
    };

    let mut settings = state.settings.clone();
    settings.market = market;

    // The adapters use blocking HTTP; keep them off the async workers.
    let worker_state = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        if use_store {
            cli::run_store_analysis(
                worker_state.store.as_ref(),
                worker_state.sentiment_port.as_ref(),
                &settings,
            )
        } else {
            cli::run_api_analysis(
                worker_state.market_port.as_ref(),
                worker_state.sentiment_port.as_ref(),
                &settings,
            )
        }
    })
    .await
    .map_err(|e| WebError::internal(e.to_string()))?
    .map_err(WebError::from)?;

    let template = ResultTemplate {
        view: ResultView::from(&result),
    };
    let fragment = template
        .render()
        .map_err(|e| WebError::internal(e.to_string()))?;

    if is_htmx_request(&headers) {
        Ok(Html(fragment).into_response())
    } else {
        let page = BasePage {
            title: "Analysis result",
            content: &fragment,
        };
        match page.render() {
            Ok(html) => Ok(Html(html).into_response()),
            Err(_) => Ok(Html(fragment).into_response()),
        }
    }
}

pub async fn not_found() -> WebError {
    WebError::not_found("Page not found")
}
