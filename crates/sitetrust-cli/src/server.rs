//! HTTP service mode.
//!
//! `POST /check` takes `{"url": "..."}` and answers with the report text
//! and score. One engine serves every request.

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sitetrust::TrustEngine;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

/// Body of `POST /check`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Address to check
    pub url: String,
}

/// Answer to `POST /check`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Human-readable report
    pub report_text: String,
    /// Final score, rounded to two places
    pub score: f64,
}

/// Routes backed by a shared engine.
pub fn router(engine: Arc<TrustEngine>) -> Router {
    Router::new()
        .route("/check", post(check))
        .route("/health", get(health))
        .with_state(engine)
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, engine: Arc<TrustEngine>) -> Result<()> {
    info!(address = %listener.local_addr()?, "listening");
    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn check(
    State(engine): State<Arc<TrustEngine>>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!(error = %rejection, "rejected request body");
            return (StatusCode::BAD_REQUEST, "Invalid request").into_response();
        }
    };

    let report = engine.check(&request.url).await;
    Json(CheckResponse {
        report_text: report.text().to_string(),
        score: report.score(),
    })
    .into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use sitetrust::{FetchOutcome, Fetcher, Finding, Probe};
    use std::net::SocketAddr;
    use url::Url;

    struct DirectFetcher;

    #[async_trait]
    impl Fetcher for DirectFetcher {
        async fn fetch(&self, url: &Url) -> sitetrust::Result<FetchOutcome> {
            Ok(FetchOutcome::direct(url.clone(), 200))
        }
    }

    struct FixedProbe;

    #[async_trait]
    impl Probe for FixedProbe {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn check(&self, _address: &Url) -> Finding {
            Finding::new(0.6, ["- looked fine"])
        }
    }

    async fn spawn_server() -> SocketAddr {
        let engine = TrustEngine::builder()
            .fetcher(DirectFetcher)
            .probe(FixedProbe)
            .build()
            .unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::new(engine));
        tokio::spawn(async move { axum::serve(listener, app).await });
        addr
    }

    #[tokio::test]
    async fn check_returns_text_and_score() {
        let addr = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("http://{addr}/check"))
            .json(&json!({ "url": "https://example.com" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: CheckResponse = response.json().await.unwrap();
        assert!((body.score - 0.8).abs() < 1e-9);
        assert!(body.report_text.contains("[+] Result from fixed:"));
        assert!(body
            .report_text
            .ends_with("[!] Final trust score: 0.80 - the site is safe to visit"));
    }

    #[tokio::test]
    async fn malformed_address_is_a_report_not_an_error() {
        let addr = spawn_server().await;
        let body: CheckResponse = reqwest::Client::new()
            .post(format!("http://{addr}/check"))
            .json(&json!({ "url": "::not a url::" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert!(body.score.abs() < f64::EPSILON);
        assert!(body.report_text.contains("may be malicious"));
    }

    #[tokio::test]
    async fn bad_body_is_rejected() {
        let addr = spawn_server().await;
        let client = reqwest::Client::new();

        for body in ["{not json", "{\"address\": \"https://example.com\"}"] {
            let response = client
                .post(format!("http://{addr}/check"))
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await
                .unwrap();

            assert_eq!(response.status(), 400, "{body}");
            assert_eq!(response.text().await.unwrap(), "Invalid request");
        }
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let addr = spawn_server().await;
        let body: serde_json::Value = reqwest::get(format!("http://{addr}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "ok");
    }
}
