use sitetrust_core::TrustError;
use thiserror::Error;

/// Result type alias for probe internals
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

/// Errors raised inside a probe before it is turned into a finding
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Address had no usable host
    #[error("no host in {0}")]
    MissingHost(String),

    /// TLS handshake or setup failed
    #[error("TLS error: {0}")]
    Tls(String),

    /// Leaf certificate could not be read
    #[error("certificate error: {0}")]
    Certificate(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// WHOIS lookup error
    #[error("WHOIS error: {0}")]
    Whois(String),

    /// Page-rank service error
    #[error("page-rank error: {0}")]
    PageRank(String),

    /// Probe settings are unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// Network I/O error
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),

    /// Timeout
    #[error("operation timed out after {0} seconds")]
    Timeout(u64),
}

impl From<ProbeError> for TrustError {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::Config(msg) => Self::Config(msg),
            ProbeError::Network(e) => Self::Io(e),
            ProbeError::Timeout(secs) => Self::Timeout(secs),
            ProbeError::MissingHost(url) => Self::InvalidUrl(format!("no host in {url}")),
            other => Self::Probe {
                probe: other.kind().to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl ProbeError {
    /// Short label for the failing subsystem
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingHost(_) => "address",
            Self::Tls(_) | Self::Certificate(_) => "certificate",
            Self::Http(_) => "http",
            Self::Whois(_) => "whois",
            Self::PageRank(_) => "page-rank",
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Timeout(_) => "timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_failures_map_to_probe_errors() {
        let err: TrustError = ProbeError::Whois("connection reset".into()).into();
        match err {
            TrustError::Probe { probe, message } => {
                assert_eq!(probe, "whois");
                assert_eq!(message, "WHOIS error: connection reset");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn settings_failures_stay_config_errors() {
        let err: TrustError = ProbeError::Config("bad key".into()).into();
        assert!(matches!(err, TrustError::Config(_)));

        let err: TrustError = ProbeError::Timeout(15).into();
        assert!(matches!(err, TrustError::Timeout(15)));
    }
}
