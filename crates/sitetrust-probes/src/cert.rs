//! Certificate-trust probe.
//!
//! Connects straight to the target over TLS and looks at the leaf
//! certificate: one that names an organization is worth more than one that
//! only vouches for a domain. Chain validation is whatever the handshake
//! already enforces.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sitetrust_core::{Finding, Probe};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{self, ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tracing::debug;
use url::Url;
use x509_parser::x509::AttributeTypeAndValue;

use crate::error::{ProbeError, ProbeResult};
use crate::settings::ProbeSettings;

/// Score for a certificate that only vouches for a domain.
const DOMAIN_ONLY_SCORE: f64 = 0.5;

/// Fields of the leaf certificate the probe reports on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSummary {
    /// Subject common name
    pub issued_to: String,
    /// Subject organization, when the certificate names one
    pub organization: Option<String>,
    /// Issuer organization, or common name when it has none
    pub issuer: String,
    /// Start of the validity window
    pub not_before: DateTime<Utc>,
    /// End of the validity window
    pub not_after: DateTime<Utc>,
}

/// Inspects the leaf certificate presented on the TLS port
pub struct CertificateProbe {
    connector: TlsConnector,
    port: u16,
    timeout: Duration,
}

impl CertificateProbe {
    /// Create a probe trusting the bundled web PKI roots
    pub fn new(settings: &ProbeSettings) -> ProbeResult<Self> {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()
        .map_err(|e| ProbeError::Tls(e.to_string()))?
        .with_root_certificates(roots)
        .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
            port: settings.tls_port,
            timeout: settings.timeout,
        })
    }

    /// Handshake with `host` and summarize the first certificate it sends
    pub async fn leaf_certificate(&self, host: &str) -> ProbeResult<CertificateSummary> {
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| ProbeError::Tls(format!("invalid server name {host:?}: {e}")))?;
        let secs = self.timeout.as_secs();

        debug!(host, port = self.port, "TLS handshake");
        let tcp = timeout(self.timeout, TcpStream::connect((host, self.port)))
            .await
            .map_err(|_| ProbeError::Timeout(secs))??;
        let tls = timeout(self.timeout, self.connector.connect(server_name, tcp))
            .await
            .map_err(|_| ProbeError::Timeout(secs))?
            .map_err(|e| ProbeError::Tls(e.to_string()))?;

        let (_, session) = tls.get_ref();
        let leaf = session
            .peer_certificates()
            .and_then(<[_]>::first)
            .ok_or_else(|| ProbeError::Certificate("server presented no certificate".into()))?;

        summarize(leaf.as_ref())
    }
}

#[async_trait]
impl Probe for CertificateProbe {
    fn name(&self) -> &str {
        "certificate"
    }

    async fn check(&self, address: &Url) -> Finding {
        let Some(host) = address.host_str() else {
            return Finding::failure(ProbeError::MissingHost(address.to_string()).to_string());
        };
        // IPv6 literals come back bracketed
        let host = host.trim_start_matches('[').trim_end_matches(']');

        match self.leaf_certificate(host).await {
            Ok(summary) => grade(&summary),
            Err(e) => Finding::failure(e.to_string()),
        }
    }
}

/// Read the reported fields out of a DER-encoded certificate.
pub fn summarize(der: &[u8]) -> ProbeResult<CertificateSummary> {
    let (_, cert) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| ProbeError::Certificate(e.to_string()))?;

    let subject = cert.subject();
    let issuer = cert.issuer();

    Ok(CertificateSummary {
        issued_to: first_value(subject.iter_common_name()).unwrap_or_else(|| subject.to_string()),
        organization: first_value(subject.iter_organization()),
        issuer: first_value(issuer.iter_organization())
            .or_else(|| first_value(issuer.iter_common_name()))
            .unwrap_or_else(|| issuer.to_string()),
        not_before: asn1_to_utc(cert.validity().not_before),
        not_after: asn1_to_utc(cert.validity().not_after),
    })
}

/// Turn a certificate summary into a finding.
pub fn grade(summary: &CertificateSummary) -> Finding {
    let validity = format!(
        "- Valid: \"{}\" - \"{}\"",
        summary.not_before.format("%Y-%m-%d"),
        summary.not_after.format("%Y-%m-%d")
    );
    let issued_by = format!("- Issued by: \"{}\"", summary.issuer);

    match &summary.organization {
        Some(organization) => Finding::new(
            1.0,
            [
                format!("- Certificate issued to domain: \"{}\"", summary.issued_to),
                format!("- For organization: \"{organization}\""),
                issued_by,
                validity,
            ],
        ),
        None => Finding::new(
            DOMAIN_ONLY_SCORE,
            [
                format!(
                    "- Certificate only vouches for the domain: \"{}\"",
                    summary.issued_to
                ),
                issued_by,
                validity,
            ],
        ),
    }
}

fn first_value<'a, 'b: 'a>(
    mut values: impl Iterator<Item = &'a AttributeTypeAndValue<'b>>,
) -> Option<String> {
    values
        .next()
        .and_then(|value| value.as_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Convert an ASN.1 `GeneralizedTime` / `UTCTime` to `DateTime<Utc>`.
fn asn1_to_utc(t: x509_parser::time::ASN1Time) -> DateTime<Utc> {
    Utc.timestamp_opt(t.timestamp(), 0)
        .single()
        .unwrap_or_default()
}
