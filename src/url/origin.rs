use crate::url::parse_absolute;
use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// The scheme, host and (non-default) port of a URL
///
/// Serialized without a trailing slash, e.g. `https://example.com` or
/// `http://127.0.0.1:8080`. Two URLs share an origin iff these components are
/// identical. Used as the robots policy cache key and as the base that
/// root-relative links are resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Origin(String);

impl Origin {
    /// Derives the origin of a parsed URL
    ///
    /// URLs without a host (`mailto:`, `data:`, `file:` and friends) have an
    /// opaque origin and are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use sitewalk::url::Origin;
    ///
    /// let url = Url::parse("https://example.com:8443/docs?q=1").unwrap();
    /// assert_eq!(Origin::from_url(&url).unwrap().as_str(), "https://example.com:8443");
    ///
    /// let url = Url::parse("https://example.com:443/").unwrap();
    /// assert_eq!(Origin::from_url(&url).unwrap().as_str(), "https://example.com");
    /// ```
    pub fn from_url(url: &Url) -> UrlResult<Self> {
        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(UrlError::MissingOrigin(url.to_string()));
        }
        Ok(Self(origin.ascii_serialization()))
    }

    /// Parses a URL string and derives its origin
    pub fn parse(input: &str) -> UrlResult<Self> {
        let url = parse_absolute(input)?;
        Self::from_url(&url)
    }

    /// Location of this origin's robots directives
    pub fn robots_url(&self) -> String {
        format!("{}/robots.txt", self.0)
    }

    /// Prefixes a root-relative path (`/about`) with this origin
    ///
    /// No normalization is applied: `//cdn.example.com/x` becomes
    /// `https://example.com//cdn.example.com/x`.
    pub fn join_path(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
