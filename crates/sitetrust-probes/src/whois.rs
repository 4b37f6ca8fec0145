//! WHOIS lookup integration using whois-rs.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::domain::RegistrationLookup;
use crate::error::{ProbeError, ProbeResult};

/// The part of a WHOIS answer the domain grade uses
#[derive(Debug, Clone, Default)]
pub struct WhoisRecord {
    /// Domain creation date, as the registry wrote it
    pub creation_date: Option<String>,
}

impl WhoisRecord {
    /// Creation date parsed into UTC, when the registry format is recognized
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.creation_date.as_deref().and_then(parse_whois_date)
    }
}

/// WHOIS client
#[derive(Clone)]
pub struct WhoisClient {
    whois: Arc<whois_rs::WhoIs>,
    timeout: Duration,
}

impl WhoisClient {
    /// Create a new WHOIS client
    pub fn new(timeout: Duration) -> ProbeResult<Self> {
        // Load from embedded server list
        let whois = whois_rs::WhoIs::from_string(include_str!("whois_servers.json"))
            .map_err(|e| ProbeError::Whois(e.to_string()))?;
        Ok(Self {
            whois: Arc::new(whois),
            timeout,
        })
    }

    /// Lookup WHOIS information for a domain
    pub async fn lookup_domain(&self, domain: &str) -> ProbeResult<WhoisRecord> {
        let whois = Arc::clone(&self.whois);
        let query = domain.to_string();

        debug!(domain, "WHOIS lookup");
        // whois-rs blocks on its socket
        let lookup = tokio::task::spawn_blocking(move || {
            let options = whois_rs::WhoIsLookupOptions::from_string(&query)
                .map_err(|e| ProbeError::Whois(e.to_string()))?;
            whois
                .lookup(options)
                .map_err(|e| ProbeError::Whois(e.to_string()))
        });

        let raw = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| ProbeError::Whois(e.to_string()))??;

        Ok(parse_whois_response(&raw))
    }
}

#[async_trait]
impl RegistrationLookup for WhoisClient {
    async fn creation_date(&self, domain: &str) -> ProbeResult<DateTime<Utc>> {
        let record = self.lookup_domain(domain).await?;
        match (&record.creation_date, record.created_at()) {
            (_, Some(created)) => Ok(created),
            (Some(raw), None) => Err(ProbeError::Whois(format!(
                "unrecognized creation date {raw:?}"
            ))),
            (None, None) => Err(ProbeError::Whois("no creation date in record".into())),
        }
    }
}

/// Pull the creation date out of a raw WHOIS response.
///
/// The registry answer comes before any registrar referral, so the first
/// creation line wins.
fn parse_whois_response(raw: &str) -> WhoisRecord {
    let creation_date = raw
        .lines()
        .filter_map(|line| line.trim().split_once(':'))
        .find(|(key, value)| {
            !value.trim().is_empty()
                && matches!(
                    key.trim().to_lowercase().as_str(),
                    "creation date"
                        | "created"
                        | "created on"
                        | "registered on"
                        | "registration time"
                        | "domain registration date"
                        | "registered"
                )
        })
        .map(|(_, value)| value.trim().to_string());

    WhoisRecord { creation_date }
}

/// Parse the date formats registries commonly use.
fn parse_whois_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value.get(..19).unwrap_or(value), format)
        {
            return Some(parsed.and_utc());
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d", "%d.%m.%Y", "%Y/%m/%d"];
    let first_token = value.split_whitespace().next()?;
    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(first_token, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    const VERISIGN_SAMPLE: &str = "\
   Domain Name: EXAMPLE.COM
   Registry Domain ID: 2336799_DOMAIN_COM-VRSN
   Registrar WHOIS Server: whois.iana.org
   Updated Date: 2024-08-14T07:01:34Z
   Creation Date: 1995-08-14T04:00:00Z
   Registry Expiry Date: 2025-08-13T04:00:00Z
   Registrar: RESERVED-Internet Assigned Numbers Authority
   Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited
   Name Server: A.IANA-SERVERS.NET
   Name Server: B.IANA-SERVERS.NET
";

    #[test]
    fn reads_creation_date_from_registry_answer() {
        let record = parse_whois_response(VERISIGN_SAMPLE);

        assert_eq!(record.creation_date.as_deref(), Some("1995-08-14T04:00:00Z"));
        assert_eq!(
            record.created_at(),
            Some(Utc.with_ymd_and_hms(1995, 8, 14, 4, 0, 0).unwrap())
        );
    }

    #[test]
    fn first_creation_date_wins() {
        let raw = "Created:\nCreation Date: 2001-01-01T00:00:00Z\ncreated: 2019-05-05\n";
        let record = parse_whois_response(raw);
        assert_eq!(record.created_at().unwrap().year(), 2001);
    }

    #[test]
    fn parses_common_date_formats() {
        let cases = [
            ("1997-09-15T04:00:00.000Z", (1997, 9, 15)),
            ("2003-07-01 12:30:00 CLST", (2003, 7, 1)),
            ("2010-02-03", (2010, 2, 3)),
            ("15-Sep-1997", (1997, 9, 15)),
            ("2008.01.20 09:41:22", (2008, 1, 20)),
            ("20.01.2008", (2008, 1, 20)),
        ];
        for (raw, (y, m, d)) in cases {
            let parsed = parse_whois_date(raw).unwrap_or_else(|| panic!("{raw}"));
            assert_eq!((parsed.year(), parsed.month(), parsed.day()), (y, m, d), "{raw}");
        }
    }

    #[test]
    fn unknown_date_format_is_none() {
        assert!(parse_whois_date("sometime last spring").is_none());
        assert!(parse_whois_date("").is_none());
    }

    #[test]
    fn record_without_creation_date() {
        let record = parse_whois_response("No match for \"NOPE.COM\".\n");
        assert!(record.creation_date.is_none());
        assert!(record.created_at().is_none());
    }
}
