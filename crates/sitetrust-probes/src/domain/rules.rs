//! Domain-reputation scoring rules.
//!
//! Pure functions over a hostname and whatever the registry and page-rank
//! lookups managed to find, so the arithmetic can be tested offline.

use chrono::{DateTime, Months, Utc};
use sitetrust_core::{normalize_host, registrable_domain, site_name, Finding, ScoreSheet};

/// Page ranks below this count as low.
pub const RANK_THRESHOLD: u8 = 4;

/// Jaro-Winkler similarity at which a site name looks like a trusted one.
pub const SIMILARITY_THRESHOLD: f64 = 0.9;

const UNKNOWN_AGE_PENALTY: f64 = 0.3;
const RECENT_PENALTY: f64 = 0.4;
const LOW_RANK_PENALTY: f64 = 0.3;
const SUBDOMAIN_PENALTY: f64 = 0.5;
const HYPHEN_PENALTY: f64 = 0.7;
const CONFUSABLE_PENALTY: f64 = 0.5;
const DIGIT_PENALTY: f64 = 0.7;
const IMPERSONATION_PENALTY: f64 = 0.4;

/// Characters that pass for a different Latin letter.
const CONFUSABLES: &[(char, char)] = &[
    ('е', 'e'),
    ('о', 'o'),
    ('с', 'c'),
    ('р', 'p'),
    ('а', 'a'),
    ('0', 'o'),
    ('@', 'a'),
    ('ь', 'b'),
];

/// What the external lookups returned; `Err` holds the reason a lookup
/// came back empty.
#[derive(Debug, Clone)]
pub struct DomainEvidence {
    /// Registration date from WHOIS
    pub created: Result<DateTime<Utc>, String>,
    /// Integer page rank, 0 to 10
    pub rank: Result<u8, String>,
}

/// Score a hostname. `host` should already be decoded from punycode.
pub fn assess(
    host: &str,
    evidence: &DomainEvidence,
    trusted: &[String],
    now: DateTime<Utc>,
) -> Finding {
    let mut sheet = ScoreSheet::new();
    let rank = evidence.rank.as_ref().ok().copied();

    match &evidence.created {
        Ok(created) => {
            let (factor, note) = age_rule(*created, now);
            sheet.penalize(factor, note);
        }
        // Without a rank there is no evidence the domain is established
        Err(reason) if rank.map_or(true, |r| r < RANK_THRESHOLD) => sheet.penalize(
            UNKNOWN_AGE_PENALTY,
            format!("- Could not get the creation date of \"{host}\" ({reason}) - it may be newly created"),
        ),
        Err(reason) => sheet.note(format!("- Creation date unavailable ({reason})")),
    }

    match &evidence.rank {
        Err(reason) => sheet.note(format!("- PageRank not available ({reason})")),
        Ok(rank) if *rank < RANK_THRESHOLD => {
            sheet.penalize(LOW_RANK_PENALTY, format!("- Low PageRank: \"{rank}/10\""));
        }
        Ok(rank) => sheet.note(format!("- PageRank: \"{rank}/10\"")),
    }

    if host.matches('.').count() > 2 {
        sheet.penalize(SUBDOMAIN_PENALTY, "- Too many subdomains");
    }

    if host.contains('-') {
        sheet.penalize(HYPHEN_PENALTY, "- Hostname contains a hyphen");
    }

    sheet.penalize_all(CONFUSABLE_PENALTY, confusables(host));

    if host.chars().any(|c| c.is_ascii_digit()) {
        sheet.penalize(DIGIT_PENALTY, format!("- {host} contains digits"));
    }

    if let Some(entry) = impersonated(host, trusted) {
        sheet.penalize(
            IMPERSONATION_PENALTY,
            format!("- Similar to trusted domain: {entry}"),
        );
    }

    sheet.finish()
}

/// Multiplier and note for a known registration date.
///
/// Only the first six months are penalized; every older tier is neutral.
pub fn age_rule(created: DateTime<Utc>, now: DateTime<Utc>) -> (f64, String) {
    let younger_than = |months: u32| {
        created
            .checked_add_months(Months::new(months))
            .is_some_and(|limit| limit > now)
    };
    let date = created.format("%Y-%m-%d");

    if younger_than(6) {
        (RECENT_PENALTY, format!("- Created less than 6 months ago: {date}"))
    } else if younger_than(12) {
        (1.0, format!("- Created less than a year ago: {date}"))
    } else if younger_than(60) {
        (1.0, format!("- Created more than a year ago: {date}"))
    } else {
        (1.0, format!("- Created more than 5 years ago: {date}"))
    }
}

/// One note per confusable character in `host`.
pub fn confusables(host: &str) -> Vec<String> {
    host.chars()
        .filter_map(|c| {
            CONFUSABLES
                .iter()
                .find(|(lookalike, _)| *lookalike == c)
                .map(|(lookalike, latin)| {
                    format!("- Possible substitution: '{lookalike}' for '{latin}'")
                })
        })
        .collect()
}

/// First trusted entry whose site name is close to the host's.
///
/// Entries may be bare site names (`google`) or hostnames (`www.google.com`).
/// A host that is itself one of the listed sites is not an impersonator.
pub fn impersonated<'a>(host: &str, trusted: &'a [String]) -> Option<&'a str> {
    let name = site_name(host)?;
    if trusted.iter().any(|entry| lists_host(entry, host)) {
        return None;
    }

    trusted
        .iter()
        .find(|entry| {
            let entry = normalize_host(entry);
            let trusted_name = site_name(&entry).unwrap_or(entry.as_str());
            strsim::jaro_winkler(name, trusted_name) >= SIMILARITY_THRESHOLD
        })
        .map(String::as_str)
}

fn lists_host(entry: &str, host: &str) -> bool {
    let entry = normalize_host(entry);
    if entry.contains('.') {
        registrable_domain(&entry) == registrable_domain(host)
    } else {
        site_name(host) == Some(entry.as_str())
    }
}
