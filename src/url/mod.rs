//! URL handling module for Sumi-Crawl
//!
//! URL strings are the unit of identity throughout a crawl and are never
//! normalized. This module only provides the few transforms the crawler
//! needs: strict parsing, host identifiers for robots caching, and
//! resolution of root-relative links.

mod host;
mod resolve;

// Re-export main functions
pub use host::{host_identifier, is_http_scheme, robots_url};
pub use resolve::resolve_href;

use crate::{UrlError, UrlResult};
use url::Url;

/// Schemes a crawled link may carry
///
/// Pseudo-schemes found in anchors (`javascript:`, `tel:`, `data:`, ...) are
/// not locations and must not be counted as discovered URLs.
const KNOWN_SCHEMES: &[&str] = &["http", "https", "ftp", "file", "jar", "mailto"];

/// Parses a discovered or seed URL string
///
/// Unlike a browser, no base URL is applied: relative strings such as
/// `"page.html"` or plain text such as `"not a url"` are rejected, as are
/// URLs whose scheme is not in [`KNOWN_SCHEMES`]. The crawler treats a
/// rejection as "this URL yields nothing", never as a fatal error.
///
/// # Arguments
///
/// * `raw` - The URL string exactly as found
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The string is not an absolute URL
///
/// # Examples
///
/// ```
/// use sumi_crawl::url::parse_crawl_url;
///
/// assert!(parse_crawl_url("https://example.com/").is_ok());
/// assert!(parse_crawl_url("not a url").is_err());
/// assert!(parse_crawl_url("javascript:void(0)").is_err());
/// ```
pub fn parse_crawl_url(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if !KNOWN_SCHEMES.contains(&url.scheme()) {
        return Err(UrlError::Parse(format!(
            "{}: unknown scheme '{}'",
            raw,
            url.scheme()
        )));
    }

    Ok(url)
}
