use url::Url;

/// Builds the robots cache key for a URL
///
/// The identifier is `scheme://hostname`. Ports are deliberately not part of
/// the key, so `https://example.com:8443/a` and `https://example.com/b`
/// share one robots.txt entry.
///
/// URLs without a host (e.g. `mailto:`) still get a stable key of the form
/// `scheme://`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_crawl::url::host_identifier;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(host_identifier(&url), "https://example.com");
///
/// let url = Url::parse("http://EXAMPLE.COM:8080/").unwrap();
/// assert_eq!(host_identifier(&url), "http://example.com");
/// ```
pub fn host_identifier(url: &Url) -> String {
    format!("{}://{}", url.scheme(), url.host_str().unwrap_or(""))
}

/// Returns the robots.txt location for the URL's host
///
/// Returns `None` for schemes the robots mechanism does not cover.
pub fn robots_url(url: &Url) -> Option<String> {
    if !is_http_scheme(url) || url.host_str().is_none() {
        return None;
    }
    Some(format!("{}/robots.txt", host_identifier(url)))
}

/// True for `http` and `https`
pub fn is_http_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
