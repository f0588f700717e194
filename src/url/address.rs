use crate::UrlError;
use serde::Serialize;
use url::Url;

/// A canonicalized absolute URL
///
/// An `Address` is immutable once constructed. The fragment is always
/// stripped, the scheme must be http or https, and `host` keeps the port
/// when one is present so that non-default-port origins stay distinct.
/// `robots_path` is the path-plus-query form evaluated by robots matchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    /// Full string form of the URL
    pub full: String,

    /// Host, including the port when present (e.g. "example.com:8080")
    pub host: String,

    /// URL scheme ("http" or "https")
    pub scheme: String,

    /// Path and query, the portion robots.txt rules are matched against
    pub robots_path: String,
}

impl Address {
    /// Parses a raw string into an `Address`
    ///
    /// # Arguments
    ///
    /// * `raw` - An absolute URL string
    ///
    /// # Returns
    ///
    /// * `Ok(Address)` - The canonicalized address, fragment stripped
    /// * `Err(UrlError)` - The string is not an absolute http(s) URL
    ///
    /// # Examples
    ///
    /// ```
    /// use sitewalk::url::Address;
    ///
    /// let addr = Address::parse("https://example.com/page?q=1#section").unwrap();
    /// assert_eq!(addr.full, "https://example.com/page?q=1");
    /// assert_eq!(addr.host, "example.com");
    /// assert_eq!(addr.robots_path, "/page?q=1");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        let url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;
        Self::from_url(url)
    }

    /// Resolves a reference against this address, producing a new `Address`
    ///
    /// Relative references are joined against this URL; absolute references
    /// replace it. Returns `None` when the reference cannot be resolved or
    /// resolves to a non-http(s) scheme, so callers can treat unusable link
    /// targets uniformly.
    pub fn join(&self, reference: &str) -> Option<Address> {
        let base = Url::parse(&self.full).ok()?;
        let url = base.join(reference).ok()?;
        Self::from_url(url).ok()
    }

    /// Builds the robots.txt URL for this address's origin
    pub fn robots_url(&self) -> String {
        format!("{}://{}/robots.txt", self.scheme, self.host)
    }

    fn from_url(mut url: Url) -> Result<Self, UrlError> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        url.set_fragment(None);

        let host = url.host_str().ok_or(UrlError::MissingHost)?;
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let robots_path = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };

        Ok(Address {
            full: url.to_string(),
            host,
            scheme: url.scheme().to_string(),
            robots_path,
        })
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let addr = Address::parse("https://example.com/page").unwrap();
        assert_eq!(addr.full, "https://example.com/page");
        assert_eq!(addr.host, "example.com");
        assert_eq!(addr.scheme, "https");
        assert_eq!(addr.robots_path, "/page");
    }

    #[test]
    fn test_parse_strips_fragment() {
        let addr = Address::parse("https://example.com/page#section").unwrap();
        assert_eq!(addr.full, "https://example.com/page");
    }

    #[test]
    fn test_parse_keeps_query() {
        let addr = Address::parse("https://example.com/search?q=rust&page=2").unwrap();
        assert_eq!(addr.robots_path, "/search?q=rust&page=2");
    }

    #[test]
    fn test_parse_keeps_port() {
        let addr = Address::parse("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(addr.host, "127.0.0.1:8080");
        assert_eq!(addr.robots_url(), "http://127.0.0.1:8080/robots.txt");
    }

    #[test]
    fn test_parse_empty_path_becomes_root() {
        let addr = Address::parse("https://example.com").unwrap();
        assert_eq!(addr.full, "https://example.com/");
        assert_eq!(addr.robots_path, "/");
    }

    #[test]
    fn test_parse_rejects_relative() {
        assert!(Address::parse("/just/a/path").is_err());
    }

    #[test]
    fn test_parse_rejects_non_http_scheme() {
        let err = Address::parse("ftp://example.com/file").unwrap_err();
        assert!(matches!(err, UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_join_relative_path() {
        let base = Address::parse("https://example.com/docs/intro").unwrap();
        let joined = base.join("guide").unwrap();
        assert_eq!(joined.full, "https://example.com/docs/guide");
    }

    #[test]
    fn test_join_absolute_path() {
        let base = Address::parse("https://example.com/docs/intro").unwrap();
        let joined = base.join("/about").unwrap();
        assert_eq!(joined.full, "https://example.com/about");
    }

    #[test]
    fn test_join_absolute_url() {
        let base = Address::parse("https://example.com/").unwrap();
        let joined = base.join("https://other.example.org/page").unwrap();
        assert_eq!(joined.full, "https://other.example.org/page");
        assert_eq!(joined.host, "other.example.org");
    }

    #[test]
    fn test_join_strips_fragment() {
        let base = Address::parse("https://example.com/").unwrap();
        let joined = base.join("/page#top").unwrap();
        assert_eq!(joined.full, "https://example.com/page");
    }

    #[test]
    fn test_join_empty_reference_is_self_without_fragment() {
        let base = Address::parse("https://example.com/page").unwrap();
        let joined = base.join("").unwrap();
        assert_eq!(joined.full, "https://example.com/page");
    }

    #[test]
    fn test_join_rejects_special_schemes() {
        let base = Address::parse("https://example.com/").unwrap();
        assert!(base.join("javascript:void(0)").is_none());
        assert!(base.join("mailto:someone@example.com").is_none());
    }

    #[test]
    fn test_robots_url() {
        let addr = Address::parse("https://example.com/deep/path?x=1").unwrap();
        assert_eq!(addr.robots_url(), "https://example.com/robots.txt");
    }

    #[test]
    fn test_serialized_field_names() {
        let addr = Address::parse("https://example.com/page").unwrap();
        let json = serde_json::to_value(&addr).unwrap();
        assert_eq!(json["Full"], "https://example.com/page");
        assert_eq!(json["Host"], "example.com");
        assert_eq!(json["Scheme"], "https");
        assert_eq!(json["RobotsPath"], "/page");
    }
}
