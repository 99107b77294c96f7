//! Robots.txt rule sets
//!
//! Parsing and matching is delegated to the robotstxt crate. A rule set is
//! either a fetched document or one of the two fallbacks used when no
//! document could be obtained.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt data for one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRobots {
    /// No restrictions (robots.txt answered with a 4xx)
    AllowAll,
    /// Nothing may be fetched (5xx, I/O failure, non-HTTP scheme)
    DenyAll,
    /// Raw robots.txt body, matched on demand
    Rules(String),
}

impl ParsedRobots {
    /// Creates a rule set from raw robots.txt content
    ///
    /// An empty or unparseable document places no restrictions, which is what
    /// the matcher itself reports for it.
    pub fn from_content(content: &str) -> Self {
        Self::Rules(content.to_string())
    }

    /// Creates a permissive rule set
    pub fn allow_all() -> Self {
        Self::AllowAll
    }

    /// Creates a rule set that refuses every URL
    pub fn deny_all() -> Self {
        Self::DenyAll
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The full URL to check (e.g., "https://example.com/page.html")
    /// * `user_agent` - The agent name whose robots group applies
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed
    /// * `false` - If the URL is disallowed
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        match self {
            Self::AllowAll => true,
            Self::DenyAll => false,
            Self::Rules(content) if content.trim().is_empty() => true,
            Self::Rules(content) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(content, user_agent, url)
            }
        }
    }
}
