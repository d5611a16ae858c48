//! Web adapter handler tests (feature `web`).
#![cfg(feature = "web")]

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::*;
use fearcross::adapters::web::{build_router, AppState};
use fearcross::cli::AnalysisSettings;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::util::ServiceExt;

fn test_state() -> AppState {
    AppState {
        market_port: Arc::new(
            MockMarketPort::new().with_daily(ramp_ending_today("KRW-BTC", 130, 100.0, 230.0)),
        ),
        sentiment_port: Arc::new(MockSentimentPort::with_value("15", "Extreme Fear")),
        store: Arc::new(MockStorePort::new()),
        settings: AnalysisSettings {
            market: "KRW-BTC".to_string(),
            short_window: 60,
            long_window: 120,
            daily_count: 200,
            store_days: 200,
        },
    }
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn dashboard_renders_the_analyze_form() {
    let router = build_router(test_state());
    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("hx-post=\"/analyze\""));
    assert!(body.contains("KRW-BTC"));
}

#[tokio::test]
async fn analyze_returns_a_signal_fragment_for_htmx() {
    let router = build_router(test_state());
    let response = router
        .oneshot(
            Request::post("/analyze")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header("HX-Request", "true")
                .body(Body::from("market=KRW-BTC&source=api"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Strong buy"));
    assert!(body.contains("extreme fear"));
    // Fragment, not a full page.
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn analyze_rejects_unknown_source() {
    let router = build_router(test_state());
    let response = router
        .oneshot(
            Request::post("/analyze")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("market=KRW-BTC&source=ftp"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_store_source_is_unprocessable() {
    let router = build_router(test_state());
    let response = router
        .oneshot(
            Request::post("/analyze")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("market=KRW-BTC&source=store"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let router = build_router(test_state());
    let response = router
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
