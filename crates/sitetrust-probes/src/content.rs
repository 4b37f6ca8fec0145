//! Response-content probe: inline-script red flags and missing protective
//! headers.

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::HeaderMap;
use reqwest::Client as HttpClient;
use sitetrust_core::{Finding, Probe, ScoreSheet};
use tracing::debug;
use url::Url;

use crate::error::{ProbeError, ProbeResult};
use crate::settings::ProbeSettings;

/// Script calls commonly used to smuggle in code.
const UNSAFE_CALLS: &[&str] = &["eval", "Function", "setInterval"];

/// Multiplier applied once per unsafe call found.
const UNSAFE_CALL_PENALTY: f64 = 0.6;

/// Protective headers and the multiplier applied when each is missing.
const REQUIRED_HEADERS: &[(&str, f64)] = &[
    ("Content-Security-Policy", 0.7),
    ("X-XSS-Protection", 0.8),
    ("Strict-Transport-Security", 0.7),
    ("X-Frame-Options", 0.8),
];

/// Fetches the page itself and grades its body and headers
pub struct ContentProbe {
    http: HttpClient,
    patterns: Vec<(&'static str, Regex)>,
}

impl ContentProbe {
    /// Create a probe with its own HTTP client
    pub fn new(settings: &ProbeSettings) -> ProbeResult<Self> {
        let http = HttpClient::builder()
            .timeout(settings.timeout)
            .user_agent(&settings.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| ProbeError::Config(format!("failed to build HTTP client: {e}")))?;

        let patterns = UNSAFE_CALLS
            .iter()
            .map(|name| {
                Regex::new(&format!(r"\b{}\s*\(", regex::escape(name)))
                    .map(|re| (*name, re))
                    .map_err(|e| ProbeError::Config(e.to_string()))
            })
            .collect::<ProbeResult<Vec<_>>>()?;

        Ok(Self { http, patterns })
    }

    /// Grade a response body and its headers.
    pub fn assess(&self, headers: &HeaderMap, body: &str) -> Finding {
        let mut sheet = ScoreSheet::new();

        for (name, pattern) in &self.patterns {
            if pattern.is_match(body) {
                sheet.penalize(
                    UNSAFE_CALL_PENALTY,
                    format!("- Found a call to {name}() - possible injected code"),
                );
            }
        }

        for (header, factor) in REQUIRED_HEADERS {
            let present = headers
                .get(*header)
                .is_some_and(|value| !value.as_bytes().is_empty());
            if !present {
                sheet.penalize(*factor, format!("- Missing header {header}"));
            }
        }

        sheet.finish()
    }

    async fn inspect(&self, address: &Url) -> ProbeResult<Finding> {
        debug!(url = %address, "fetching page body");
        let response = self
            .http
            .get(address.clone())
            .send()
            .await
            .map_err(|e| ProbeError::Http(e.to_string()))?;

        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| ProbeError::Http(e.to_string()))?;

        Ok(self.assess(&headers, &body))
    }
}

#[async_trait]
impl Probe for ContentProbe {
    fn name(&self) -> &str {
        "content"
    }

    async fn check(&self, address: &Url) -> Finding {
        match self.inspect(address).await {
            Ok(finding) => finding,
            Err(e) => Finding::failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn probe() -> ContentProbe {
        ContentProbe::new(&ProbeSettings::new().user_agent("sitetrust-test")).unwrap()
    }

    fn all_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, _) in REQUIRED_HEADERS {
            headers.insert(*name, HeaderValue::from_static("1"));
        }
        headers
    }

    #[test]
    fn clean_page_keeps_full_score() {
        let finding = probe().assess(&all_headers(), "<p>hello</p>");
        assert!((finding.score() - 1.0).abs() < f64::EPSILON);
        assert!(finding.notes().is_empty());
    }

    #[test]
    fn matches_whole_call_names_only() {
        let probe = probe();
        let headers = all_headers();

        for body in ["evaluate(x)", "myeval(x)", "eval = 1", "Functional()"] {
            let finding = probe.assess(&headers, body);
            assert!((finding.score() - 1.0).abs() < f64::EPSILON, "{body}");
        }

        let finding = probe.assess(&headers, "setInterval (tick, 10)");
        assert!((finding.score() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn each_call_name_counts_once() {
        let finding = probe().assess(&all_headers(), "eval(a); eval(b); new Function('x')");
        assert!((finding.score() - 0.36).abs() < 1e-9);
        assert_eq!(finding.notes().len(), 2);
    }

    #[test]
    fn every_penalty_compounds() {
        let body = "eval(a); Function('b'); setInterval(c, 1)";
        let finding = probe().assess(&HeaderMap::new(), body);

        let expected = 0.6_f64.powi(3) * 0.7 * 0.8 * 0.7 * 0.8;
        assert!((finding.score() - expected).abs() < 1e-9);
        assert_eq!(finding.notes().len(), 7);
    }

    #[test]
    fn empty_header_counts_as_missing() {
        let mut headers = all_headers();
        headers.insert("X-Frame-Options", HeaderValue::from_static(""));
        let finding = probe().assess(&headers, "");
        assert!((finding.score() - 0.8).abs() < 1e-9);
        assert!(finding.explanation().contains("Missing header X-Frame-Options"));
    }

    #[tokio::test]
    async fn fetched_page_with_eval_and_no_csp() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("user-agent", "sitetrust-test"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-XSS-Protection", "1; mode=block")
                    .insert_header("Strict-Transport-Security", "max-age=31536000")
                    .insert_header("X-Frame-Options", "DENY")
                    .set_body_string("<script>eval(atob('ZG9jdW1lbnQ='))</script>"),
            )
            .mount(&server)
            .await;

        let address = Url::parse(&format!("{}/", server.uri())).unwrap();
        let finding = probe().check(&address).await;

        assert!((finding.score() - 0.42).abs() < 1e-9);
        let text = finding.explanation();
        assert!(text.contains("eval()"));
        assert!(text.contains("Missing header Content-Security-Policy"));
    }

    #[tokio::test]
    async fn unreachable_page_fails_with_zero() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let address = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();
        let finding = probe().check(&address).await;

        assert!(finding.is_failure());
        assert!(finding.explanation().starts_with("HTTP error"));
    }
}
