//! Integration tests for Sumi-Crawl
//!
//! HTTP behaviour is exercised against wiremock servers; crawl engine
//! properties use in-memory link graphs so results are deterministic.

mod crawl_tests;
