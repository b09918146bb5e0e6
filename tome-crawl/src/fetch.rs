use crate::normalize::NormalizedUrl;
use std::time::Duration;
use tome_common::{Result, TomeError};
use tome_http::{FetchError, HttpClient, RequestOpts};

/// Anything that can turn a URL into an HTML body.
///
/// The crawl loop only ever talks to this trait, so tests can substitute a
/// canned site and count fetches.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &NormalizedUrl) -> std::result::Result<String, FetchError>;
}

/// [`PageSource`] backed by a real HTTP client with a fixed per-request timeout.
#[derive(Clone)]
pub struct HttpPageSource {
    client: HttpClient,
}

impl HttpPageSource {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = HttpClient::new(user_agent)
            .map_err(|e| TomeError::Client(e.to_string()))?
            .with_timeout(timeout);
        Ok(Self { client })
    }

    pub fn timeout(&self) -> Duration {
        self.client.default_timeout
    }
}

#[async_trait::async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &NormalizedUrl) -> std::result::Result<String, FetchError> {
        self.client
            .get_text(url.as_str(), RequestOpts::default())
            .await
    }
}
