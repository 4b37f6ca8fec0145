//! Probe findings.

use serde::Serialize;

/// Force a probe-supplied score into `[0, 1]`.
///
/// `NaN` counts as a failed probe.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// The output of one probe: explanatory notes plus a score multiplier.
///
/// A score of `1.0` means nothing suspicious was found; `0.0` means the
/// probe failed or found maximal concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    notes: Vec<String>,
    score: f64,
    failed: bool,
}

impl Finding {
    /// Create a finding; the score is clamped into `[0, 1]`
    pub fn new<I, S>(score: f64, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            notes: notes.into_iter().map(Into::into).collect(),
            score: clamp_score(score),
            failed: false,
        }
    }

    /// A probe that could not complete its check
    pub fn failure(note: impl Into<String>) -> Self {
        Self {
            notes: vec![note.into()],
            score: 0.0,
            failed: true,
        }
    }

    /// Score in `[0, 1]`
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Notes in the order the probe produced them
    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Whether this finding must be left out of the average
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.failed || self.score <= 0.0
    }

    /// Notes joined one per line, each terminated by a newline
    #[must_use]
    pub fn explanation(&self) -> String {
        self.notes
            .iter()
            .filter(|note| !note.is_empty())
            .fold(String::new(), |mut out, note| {
                out.push_str(note);
                out.push('\n');
                out
            })
    }
}

/// Running multiplicative score used by probes while they work.
///
/// Starts at `1.0`; every penalty multiplies it downward.
#[derive(Debug, Clone)]
pub struct ScoreSheet {
    score: f64,
    notes: Vec<String>,
}

impl Default for ScoreSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreSheet {
    /// Start a fresh sheet at `1.0`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 1.0,
            notes: Vec::new(),
        }
    }

    /// Multiply the score by `factor` and record why
    pub fn penalize(&mut self, factor: f64, note: impl Into<String>) {
        self.score *= factor;
        self.notes.push(note.into());
    }

    /// Apply one penalty covering several notes; no-op when `notes` is empty
    pub fn penalize_all(&mut self, factor: f64, notes: Vec<String>) {
        if notes.is_empty() {
            return;
        }
        self.score *= factor;
        self.notes.extend(notes);
    }

    /// Record a note without touching the score
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Turn the sheet into a finding
    #[must_use]
    pub fn finish(self) -> Finding {
        Finding::new(self.score, self.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_are_clamped() {
        assert!((Finding::new(1.7, ["x"]).score() - 1.0).abs() < f64::EPSILON);
        assert!(Finding::new(-0.3, ["x"]).score().abs() < f64::EPSILON);
        assert!(Finding::new(f64::NAN, ["x"]).score().abs() < f64::EPSILON);
    }

    #[test]
    fn zero_score_counts_as_failure() {
        assert!(Finding::new(0.0, ["nothing"]).is_failure());
        assert!(Finding::failure("boom").is_failure());
        assert!(!Finding::new(0.5, ["fine"]).is_failure());
    }

    #[test]
    fn explanation_skips_empty_notes() {
        let finding = Finding::new(1.0, ["- one", "", "- two"]);
        assert_eq!(finding.explanation(), "- one\n- two\n");
    }

    #[test]
    fn penalties_compound() {
        let mut sheet = ScoreSheet::new();
        sheet.penalize(0.6, "- eval");
        sheet.note("- informational");
        sheet.penalize(0.7, "- no csp");
        let finding = sheet.finish();
        assert!((finding.score() - 0.42).abs() < 1e-9);
        assert_eq!(finding.notes().len(), 3);
    }
}
