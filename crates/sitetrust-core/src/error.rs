use thiserror::Error;

/// Result type alias for sitetrust operations
pub type Result<T> = std::result::Result<T, TrustError>;

/// Errors that can occur while checking an address
#[derive(Error, Debug)]
pub enum TrustError {
    /// The input could not be parsed as an absolute web address
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The initial fetch could not reach the target
    #[error("connection failed: {0}")]
    Connection(String),

    /// HTTP request failed after connecting
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// The target kept redirecting past the hop budget
    #[error("too many redirects (more than {0} hops)")]
    TooManyRedirects(usize),

    /// A probe failed internally
    #[error("probe {probe} failed: {message}")]
    Probe {
        /// Name of the probe
        probe: String,
        /// Failure description
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<url::ParseError> for TrustError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_limit_names_the_hop_count() {
        let err = TrustError::TooManyRedirects(5);
        assert_eq!(err.to_string(), "too many redirects (more than 5 hops)");
    }

    #[test]
    fn parse_errors_become_invalid_url() {
        let err: TrustError = url::Url::parse("no scheme").unwrap_err().into();
        assert!(err.to_string().starts_with("invalid URL: "));
    }
}
