use super::host::host_identifier;
use url::Url;

/// Turns a raw `href` attribute into the link string the crawler enqueues
///
/// Only root-relative links (starting with `/`) are rewritten, by prefixing
/// the page's `scheme://hostname`. Everything else is returned exactly as
/// found, including path-relative links, which will later fail to parse and
/// be skipped. Empty hrefs produce nothing.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_crawl::url::resolve_href;
///
/// let page = Url::parse("https://example.com/a/b").unwrap();
/// assert_eq!(resolve_href(&page, "/c"), Some("https://example.com/c".to_string()));
/// assert_eq!(resolve_href(&page, "https://other.org"), Some("https://other.org".to_string()));
/// assert_eq!(resolve_href(&page, ""), None);
/// ```
pub fn resolve_href(page: &Url, href: &str) -> Option<String> {
    if href.is_empty() {
        return None;
    }

    if href.starts_with('/') {
        Some(format!("{}{}", host_identifier(page), href))
    } else {
        Some(href.to_string())
    }
}
