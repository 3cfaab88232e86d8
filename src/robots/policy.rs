//! Reduced robots.txt policy
//!
//! Only `Allow:` and `Disallow:` lines are understood. There are no user-agent
//! groups, no wildcards and no precedence rules; each directive value is
//! prefixed with the origin to form a full URL.

use crate::url::{Origin, LINE_SEPARATOR};

/// Allow and disallow URL lists for one origin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsPolicy {
    /// Full URLs built from `Allow:` lines
    pub allow: Vec<String>,

    /// Full URLs built from `Disallow:` lines
    pub disallow: Vec<String>,
}

impl RobotsPolicy {
    /// Creates a policy that filters nothing
    ///
    /// This is the result whenever robots.txt cannot be fetched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses robots.txt content for the given origin
    ///
    /// A line is recognised only if it starts with the literal `Allow:` or
    /// `Disallow:` (case sensitive, no leading whitespace). The value is
    /// everything after the first `": "`; lines without that separator carry
    /// no value and are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitewalk::robots::RobotsPolicy;
    /// use sitewalk::url::Origin;
    ///
    /// let origin = Origin::parse("https://example.com").unwrap();
    /// let policy = RobotsPolicy::parse(&origin, "Disallow: /private");
    /// assert_eq!(policy.disallow, vec!["https://example.com/private".to_string()]);
    /// ```
    pub fn parse(origin: &Origin, content: &str) -> Self {
        let mut policy = Self::empty();

        for line in content.split(LINE_SEPARATOR) {
            let target = if line.starts_with("Allow:") {
                &mut policy.allow
            } else if line.starts_with("Disallow:") {
                &mut policy.disallow
            } else {
                continue;
            };

            if let Some((_, path)) = line.split_once(": ") {
                target.push(origin.join_path(path));
            }
        }

        policy
    }

    /// Returns true if the link equals one of the disallowed URLs
    ///
    /// This is an exact string comparison, not a prefix match: with
    /// `Disallow: /private`, `https://example.com/private` is disallowed but
    /// `https://example.com/private/page` is not.
    pub fn is_disallowed(&self, link: &str) -> bool {
        self.disallow.iter().any(|rule| rule == link)
    }

    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.disallow.is_empty()
    }
}
