//! HTML link extraction
//!
//! Only `<a href="...">` elements are considered. Links are returned as
//! found, apart from root-relative hrefs, which are prefixed with the page's
//! scheme and host (see [`crate::url::resolve_href`]).

use crate::url::resolve_href;
use scraper::{Html, Selector};
use url::Url;

/// Extracts the outbound link strings of an HTML document
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the document was fetched from
///
/// # Returns
///
/// The link strings in document order, duplicates included
///
/// # Example
///
/// ```
/// use sumi_crawl::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let page = Url::parse("https://example.com/").unwrap();
/// assert_eq!(extract_links(html, &page), vec!["https://example.com/page"]);
/// ```
pub fn extract_links(html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_href(page_url, href))
        .collect()
}
