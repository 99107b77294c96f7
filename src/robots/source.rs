//! Retrieval of robots.txt documents

use async_trait::async_trait;
use reqwest::Client;

/// Outcome of a single robots.txt request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotsResponse {
    /// The server answered; `body` is empty unless the status was 2xx
    Status { status: u16, body: String },
    /// No HTTP answer at all (DNS, connect, TLS, body read...)
    Failed(String),
}

/// Something that can fetch a robots.txt document
///
/// The HTTP implementation is [`HttpRobotsSource`]; tests substitute an
/// in-memory source.
#[async_trait]
pub trait RobotsSource: Send + Sync {
    /// Fetches the document at `robots_url`. Must not panic on network errors.
    async fn fetch(&self, robots_url: &str) -> RobotsResponse;
}

/// Fetches robots.txt over HTTP(S) with a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpRobotsSource {
    client: Client,
}

impl HttpRobotsSource {
    /// Creates a source backed by the given client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RobotsSource for HttpRobotsSource {
    async fn fetch(&self, robots_url: &str) -> RobotsResponse {
        let response = match self.client.get(robots_url).send().await {
            Ok(response) => response,
            Err(e) => return RobotsResponse::Failed(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return RobotsResponse::Status {
                status: status.as_u16(),
                body: String::new(),
            };
        }

        match response.text().await {
            Ok(body) => RobotsResponse::Status {
                status: status.as_u16(),
                body,
            },
            Err(e) => RobotsResponse::Failed(e.to_string()),
        }
    }
}
