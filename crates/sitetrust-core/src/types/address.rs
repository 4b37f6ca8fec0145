//! Address parsing and host normalization.

use url::Url;

use crate::{Result, TrustError};

/// Parse a user-supplied address.
///
/// Only absolute `http`/`https` addresses with a host are accepted. The
/// returned [`Url`] is what gets fetched; normalization is applied only
/// when hosts are compared.
pub fn parse_address(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TrustError::InvalidUrl("empty address".into()));
    }

    let url = Url::parse(trimmed)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TrustError::InvalidUrl(format!(
            "unsupported scheme {:?} in {trimmed:?}",
            url.scheme()
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(TrustError::InvalidUrl(format!("no host in {trimmed:?}")));
    }

    Ok(url)
}

/// Lower-case a hostname and strip one leading `www.`.
pub fn normalize_host(host: &str) -> String {
    let lower = host.trim_end_matches('.').to_ascii_lowercase();
    match lower.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

/// Normalized host of `url`, if it has one.
pub fn canonical_host(url: &Url) -> Option<String> {
    url.host_str().map(normalize_host)
}

/// Whether two addresses point at different hosts after normalization.
pub fn is_cross_host(from: &Url, to: &Url) -> bool {
    canonical_host(from) != canonical_host(to)
}

/// The second-level label of a hostname (`example` in `shop.example.com`).
pub fn site_name(host: &str) -> Option<&str> {
    let mut labels = host.trim_end_matches('.').rsplit('.');
    labels.next()?;
    labels.next().filter(|label| !label.is_empty())
}

/// The last two labels of a hostname, used for registry lookups.
///
/// There is no public-suffix list behind this, so `example.co.uk` yields
/// `co.uk`. Callers that need the registered name under a multi-label
/// suffix can retry with [`domain_suffix`].
pub fn registrable_domain(host: &str) -> &str {
    domain_suffix(host, 2)
}

/// The last `labels` labels of a hostname, or the whole host if it has
/// fewer.
pub fn domain_suffix(host: &str, labels: usize) -> &str {
    let host = host.trim_end_matches('.');
    match labels
        .checked_sub(1)
        .and_then(|dots| host.rmatch_indices('.').nth(dots))
    {
        Some((idx, _)) => &host[idx + 1..],
        None => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_addresses() {
        assert!(parse_address("").is_err());
        assert!(parse_address("   ").is_err());
        assert!(parse_address("example.com").is_err());
        assert!(parse_address("ftp://example.com/file").is_err());
        assert!(parse_address("mailto:someone@example.com").is_err());
    }

    #[test]
    fn accepts_web_addresses() {
        let url = parse_address(" https://www.Example.com/path?q=1 ").unwrap();
        assert_eq!(url.host_str(), Some("www.example.com"));
        assert_eq!(url.path(), "/path");
    }

    #[test]
    fn normalizes_www_prefix_and_case() {
        assert_eq!(normalize_host("WWW.Example.COM"), "example.com");
        assert_eq!(normalize_host("example.com."), "example.com");
        assert_eq!(normalize_host("www2.example.com"), "www2.example.com");
    }

    #[test]
    fn cross_host_ignores_www() {
        let a = Url::parse("https://www.example.com/").unwrap();
        let b = Url::parse("https://example.com/login").unwrap();
        let c = Url::parse("https://example.net/").unwrap();
        assert!(!is_cross_host(&a, &b));
        assert!(is_cross_host(&a, &c));
    }

    #[test]
    fn extracts_site_name() {
        assert_eq!(site_name("mail.google.com"), Some("google"));
        assert_eq!(site_name("exa-mple123.com"), Some("exa-mple123"));
        assert_eq!(site_name("localhost"), None);
    }

    #[test]
    fn extracts_registrable_domain() {
        assert_eq!(registrable_domain("a.b.example.com"), "example.com");
        assert_eq!(registrable_domain("example.com"), "example.com");
        assert_eq!(registrable_domain("localhost"), "localhost");
    }

    #[test]
    fn suffix_takes_trailing_labels() {
        assert_eq!(domain_suffix("www.example.co.uk", 3), "example.co.uk");
        assert_eq!(domain_suffix("www.example.co.uk.", 2), "co.uk");
        assert_eq!(domain_suffix("example.co.uk", 5), "example.co.uk");
        assert_eq!(domain_suffix("example.com", 0), "example.com");
    }
}
