//! End-to-end crawl behaviour for both crawl modes

use crate::common::{graph_from, wide_graph, DenyList, GraphFetcher, MockServerRobots};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use sumi_crawl::crawler::{build_http_client, HttpPageFetcher};
use sumi_crawl::robots::AllowAll;
use sumi_crawl::{CrawlMode, Crawler, RobotsCache};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODES: [CrawlMode; 2] = [CrawlMode::Concurrent, CrawlMode::Sequential];

fn crawler(mode: CrawlMode, fetcher: Arc<GraphFetcher>, policy: Arc<DenyList>) -> Crawler {
    Crawler::new(mode, fetcher, policy).with_worker_count(8)
}

fn set(urls: &[&str]) -> HashSet<String> {
    urls.iter().map(|s| s.to_string()).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_seed_with_three_links_limit_two() {
    let links: &[&str] = &[
        "https://site.example/a",
        "https://site.example/b",
        "https://site.example/c",
    ];
    for mode in MODES {
        let fetcher = Arc::new(GraphFetcher::new(&[("https://site.example/", links)]));
        let result = crawler(mode, fetcher, Arc::new(DenyList::default()))
            .crawl("https://site.example/", 2)
            .await
            .expect("crawl succeeds");

        assert_eq!(result.len(), 2, "{:?}", mode);
        assert!(result.contains("https://site.example/"));
        assert_eq!(
            result.iter().filter(|u| links.contains(&u.as_str())).count(),
            1
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_result_never_exceeds_limit() {
    let edges = wide_graph(6);
    let total_nodes = 1 + 6 + 36;

    for mode in MODES {
        for limit in [0, 1, 2, 5, 7, 8, 20, 43, 44, 100] {
            let fetcher = Arc::new(graph_from(&edges));
            let result = crawler(mode, fetcher, Arc::new(DenyList::default()))
                .crawl("https://root.example/", limit)
                .await
                .expect("crawl succeeds");

            assert_eq!(
                result.len(),
                limit.min(total_nodes),
                "{:?} with limit {}",
                mode,
                limit
            );
        }
    }
}

#[tokio::test]
async fn test_malformed_seed_yields_empty_set() {
    for mode in MODES {
        let fetcher = Arc::new(GraphFetcher::default());
        let result = crawler(mode, fetcher.clone(), Arc::new(DenyList::default()))
            .crawl("not a url", 10)
            .await
            .expect("malformed seed is not an error");

        assert!(result.is_empty());
        assert_eq!(fetcher.calls(), 0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_url_linked_from_many_pages_appears_once() {
    let shared = "https://shared.example/";
    for mode in MODES {
        let fetcher = Arc::new(GraphFetcher::new(&[
            ("https://a.example/", &["https://b.example/", "https://c.example/", shared]),
            ("https://b.example/", &[shared, shared]),
            ("https://c.example/", &[shared, "https://b.example/"]),
        ]));
        let result = crawler(mode, fetcher.clone(), Arc::new(DenyList::default()))
            .crawl("https://a.example/", 100)
            .await
            .expect("crawl succeeds");

        assert_eq!(result.len(), 4);
        let fetched = fetcher.fetched();
        assert_eq!(fetched.iter().filter(|u| u.as_str() == shared).count(), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_disallowed_url_counted_but_links_suppressed() {
    for mode in MODES {
        let fetcher = Arc::new(GraphFetcher::new(&[
            (
                "https://site.example/",
                &["https://site.example/private", "https://site.example/public"],
            ),
            ("https://site.example/private", &["https://site.example/secret"]),
            ("https://site.example/public", &["https://site.example/open"]),
        ]));
        let policy = Arc::new(DenyList::new(&["https://site.example/private"]));
        let result = crawler(mode, fetcher.clone(), policy)
            .crawl("https://site.example/", 100)
            .await
            .expect("crawl succeeds");

        assert_eq!(
            result,
            set(&[
                "https://site.example/",
                "https://site.example/private",
                "https://site.example/public",
                "https://site.example/open",
            ]),
            "{:?}",
            mode
        );
        assert!(!fetcher
            .fetched()
            .contains(&"https://site.example/private".to_string()));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cycle_terminates_and_matches_sequential() {
    let edges: &[(&str, &[&str])] = &[
        ("https://a.example/", &["https://b.example/"]),
        ("https://b.example/", &["https://a.example/"]),
    ];

    let sequential = crawler(
        CrawlMode::Sequential,
        Arc::new(GraphFetcher::new(edges)),
        Arc::new(DenyList::default()),
    )
    .crawl("https://a.example/", 10)
    .await
    .expect("sequential crawl succeeds");
    assert_eq!(sequential, set(&["https://a.example/", "https://b.example/"]));

    for _ in 0..200 {
        let concurrent = tokio::time::timeout(
            Duration::from_secs(5),
            crawler(
                CrawlMode::Concurrent,
                Arc::new(GraphFetcher::new(edges)),
                Arc::new(DenyList::default()),
            )
            .crawl("https://a.example/", 10),
        )
        .await
        .expect("concurrent crawl terminates")
        .expect("concurrent crawl succeeds");

        assert_eq!(concurrent, sequential);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_exhaustive_crawl_matches_sequential() {
    let edges = wide_graph(5);

    let sequential = crawler(
        CrawlMode::Sequential,
        Arc::new(graph_from(&edges)),
        Arc::new(DenyList::default()),
    )
    .crawl("https://root.example/", 1000)
    .await
    .unwrap();

    for _ in 0..50 {
        let concurrent = crawler(
            CrawlMode::Concurrent,
            Arc::new(graph_from(&edges)),
            Arc::new(DenyList::default()),
        )
        .crawl("https://root.example/", 1000)
        .await
        .unwrap();
        assert_eq!(concurrent, sequential);
    }
}

#[tokio::test]
async fn test_sequential_monotonic_in_limit() {
    let edges = wide_graph(4);
    let mut previous = HashSet::new();

    for limit in 0..=25 {
        let result = crawler(
            CrawlMode::Sequential,
            Arc::new(graph_from(&edges)),
            Arc::new(DenyList::default()),
        )
        .crawl("https://root.example/", limit)
        .await
        .unwrap();

        assert!(previous.is_subset(&result), "limit {} lost URLs", limit);
        previous = result;
    }
}

#[tokio::test]
async fn test_single_worker_concurrent_crawl() {
    let edges = wide_graph(3);
    let result = Crawler::new(
        CrawlMode::Concurrent,
        Arc::new(graph_from(&edges)),
        Arc::new(AllowAll),
    )
    .with_worker_count(1)
    .crawl("https://root.example/", 1000)
    .await
    .unwrap();

    assert_eq!(result.len(), 1 + 3 + 9);
}

#[tokio::test]
async fn test_full_crawl_over_http() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /admin"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    r#"<html><head><title>Home</title></head><body>
                    <a href="{0}/page1">Page 1</a>
                    <a href="{0}/admin">Admin</a>
                    <a href="not-absolute.html">Relative</a>
                    </body></html>"#,
                    base_url
                ))
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    r#"<html><body><a href="{0}/">Home</a><a href="{0}/page2">Page 2</a></body></html>"#,
                    base_url
                ))
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    // Disallowed by robots.txt, so never requested
    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = build_http_client("TestBot/1.0", Duration::from_secs(5)).unwrap();
    let policy = Arc::new(RobotsCache::new(MockServerRobots::new(&base_url), "TestBot"));
    let crawler = Crawler::new(
        CrawlMode::Concurrent,
        Arc::new(HttpPageFetcher::new(client)),
        policy.clone(),
    )
    .with_worker_count(4);

    let result = crawler
        .crawl(&format!("{}/", base_url), 100)
        .await
        .expect("crawl succeeds");

    let expected: HashSet<String> = ["/", "/page1", "/admin", "/page2"]
        .iter()
        .map(|p| format!("{}{}", base_url, p))
        .collect();
    assert_eq!(result, expected);
    assert_eq!(policy.len(), 1);
    // Wiremock verifies request expectations when mock_server drops
}
