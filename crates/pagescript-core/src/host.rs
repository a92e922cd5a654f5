//! Host keys derived from page URLs.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::{Host, Url};

/// Normalized host name used as the per-site lookup key.
///
/// Derived from a page URL with [`HostKey::from_page_url`]. Domain names are
/// lowercased by the URL parser; IPv6 literals are stored without brackets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostKey(String);

impl HostKey {
    /// Derives the host key from a page URL.
    ///
    /// Returns `None` when the URL does not parse or has no host component
    /// (e.g. `mailto:` or `file:///` URLs).
    pub fn from_page_url(page_url: &str) -> Option<Self> {
        let url = Url::parse(page_url).ok()?;
        let host = match url.host()? {
            Host::Domain(domain) => domain.to_string(),
            Host::Ipv4(addr) => addr.to_string(),
            Host::Ipv6(addr) => addr.to_string(),
        };

        if host.is_empty() {
            return None;
        }

        Some(Self(host))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HostKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_from_https_url() {
        let key = HostKey::from_page_url("https://shop.example.com/cart").unwrap();
        assert_eq!(key.as_str(), "shop.example.com");
    }

    #[test]
    fn test_host_ignores_port_and_credentials() {
        let key = HostKey::from_page_url("http://user:pw@Example.COM:8080/a?b=c#d").unwrap();
        assert_eq!(key.as_str(), "example.com");
    }

    #[test]
    fn test_ipv6_host_without_brackets() {
        let key = HostKey::from_page_url("http://[::1]:3000/").unwrap();
        assert_eq!(key.as_str(), "::1");
    }

    #[test]
    fn test_ipv4_host() {
        let key = HostKey::from_page_url("http://127.0.0.1/index.html").unwrap();
        assert_eq!(key.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_unparseable_url_has_no_host() {
        assert!(HostKey::from_page_url("not a url").is_none());
        assert!(HostKey::from_page_url("").is_none());
    }

    #[test]
    fn test_hostless_url_has_no_host() {
        assert!(HostKey::from_page_url("mailto:someone@example.com").is_none());
        assert!(HostKey::from_page_url("file:///tmp/page.html").is_none());
        assert!(HostKey::from_page_url("about:blank").is_none());
    }
}
