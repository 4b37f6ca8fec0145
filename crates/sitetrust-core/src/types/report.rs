//! The engine's aggregated output.

use serde::Serialize;
use std::fmt;

use super::finding::clamp_score;

/// Final scores at or above this are considered safe.
pub const SAFE_THRESHOLD: f64 = 0.7;

/// Multiplier applied to the seed when a redirect leaves the original host.
pub const CROSS_HOST_PENALTY: f64 = 0.4;

/// Round a score to two decimal places.
pub fn round_score(score: f64) -> f64 {
    (clamp_score(score) * 100.0).round() / 100.0
}

/// Safe/unsafe judgement derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Score reached [`SAFE_THRESHOLD`]
    Safe,
    /// Score fell below [`SAFE_THRESHOLD`]
    Suspicious,
}

impl Verdict {
    /// Classify a final score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= SAFE_THRESHOLD {
            Self::Safe
        } else {
            Self::Suspicious
        }
    }

    /// Sentence used at the end of the report text
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Safe => "the site is safe to visit",
            Self::Suspicious => "the site may be malicious",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Suspicious => write!(f, "suspicious"),
        }
    }
}

/// A redirect discovered during the initial fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectEvent {
    /// Address that was requested
    pub from: String,
    /// Address the fetch ended on
    pub to: String,
    /// Every `Location` followed, in order, ending with `to`
    pub hops: Vec<String>,
    /// Whether the normalized hosts differ
    pub cross_host: bool,
}

/// How one probe fared, in registration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeSummary {
    /// Probe label
    pub name: String,
    /// Score the probe reported
    pub score: f64,
    /// Whether the probe was left out of the average
    pub failed: bool,
}

/// The aggregated result of checking one address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    text: String,
    score: f64,
    verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<RedirectEvent>,
    probes: Vec<ProbeSummary>,
}

impl Report {
    /// Assemble a report from the collected body text and raw score.
    ///
    /// The score is clamped and rounded, and the verdict line is appended
    /// to the text.
    pub fn new(
        body: impl Into<String>,
        raw_score: f64,
        redirect: Option<RedirectEvent>,
        probes: Vec<ProbeSummary>,
    ) -> Self {
        let score = round_score(raw_score);
        let verdict = Verdict::from_score(score);
        let mut text = body.into();
        text.push_str(&format!(
            "[!] Final trust score: {score:.2} - {}",
            verdict.describe()
        ));

        Self {
            text,
            score,
            verdict,
            redirect,
            probes,
        }
    }

    /// A check that ended before any probe could run
    pub fn fatal(message: impl fmt::Display) -> Self {
        Self::new(format!("{message}\n"), 0.0, None, Vec::new())
    }

    /// Human-readable report
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Trust score in `[0, 1]`, rounded to two places
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Safe/unsafe judgement
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Redirect observed during the initial fetch, if any
    #[must_use]
    pub const fn redirect(&self) -> Option<&RedirectEvent> {
        self.redirect.as_ref()
    }

    /// Per-probe outcomes
    #[must_use]
    pub fn probes(&self) -> &[ProbeSummary] {
        &self.probes
    }
}
