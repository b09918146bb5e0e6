//! Minimal HTTP client for fetching HTML pages as text.
//!
//! - One GET per call, bounded by a per-request timeout
//! - Failures are classified as [`FetchError::Timeout`], [`FetchError::Network`]
//!   or [`FetchError::Status`] so callers can log them uniformly
//! - Bodies are decoded as UTF-8; invalid sequences are replaced, never fatal
//! - No retries: a failed page is the caller's decision to skip
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), tome_http::FetchError> {
//! let client = tome_http::HttpClient::new("tome/0.1")?;
//! let html = client
//!     .get_text("https://free-dnd.ttrpg.ru/", tome_http::RequestOpts::default())
//!     .await?;
//! assert!(!html.is_empty());
//! # Ok(()) }
//! ```
//!
//! Observability: `tracing` events are emitted for request start, response
//! headers, a truncated body snippet (trace level) and final errors.

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode, Url};
use std::time::{Duration, Instant};
use thiserror::Error;

const SNIPPET_MAX: usize = 500;

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("client build failed: {0}")]
    Build(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned HTTP {code}")]
    Status { code: u16, body_snippet: String },
}

impl FetchError {
    /// Short, stable label for log fields.
    ///
    /// ```
    /// use tome_http::FetchError;
    /// use std::time::Duration;
    ///
    /// assert_eq!(FetchError::Timeout(Duration::from_secs(1)).kind(), "timeout");
    /// let not_found = FetchError::Status { code: 404, body_snippet: String::new() };
    /// assert_eq!(not_found.kind(), "status");
    /// ```
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Build(_) => "build",
            Self::Timeout(_) => "timeout",
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
        }
    }

    /// HTTP status code for [`FetchError::Status`], `None` otherwise.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

// ==============================
// Request Options
// ==============================

/// Per-request tuning knobs.
///
/// ```
/// use tome_http::RequestOpts;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(10)),
///     ..Default::default()
/// };
/// assert_eq!(opts.timeout.unwrap().as_secs(), 10);
/// assert!(opts.headers.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts {
    pub timeout: Option<Duration>,
    pub headers: Option<HeaderMap>,
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client that identifies itself with `user_agent`.
    ///
    /// ```no_run
    /// use tome_http::{FetchError, HttpClient};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("tome/0.1")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// # Ok::<(), FetchError>(())
    /// ```
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            default_timeout: Duration::from_secs(15),
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    ///
    /// ```no_run
    /// use tome_http::{FetchError, HttpClient};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("tome/0.1")?.with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Duration::from_secs(2));
    /// # Ok::<(), FetchError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// GET `url` and return the body as text, failing on any non-2xx status.
    pub async fn get_text(&self, url: &str, opts: RequestOpts) -> Result<String, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::Url(e.to_string()))?;
        let timeout = opts.timeout.unwrap_or(self.default_timeout);

        let mut rb = self.inner.get(url.clone()).timeout(timeout);
        if let Some(hdrs) = opts.headers {
            rb = rb.headers(hdrs);
        }

        tracing::debug!(
            host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            timeout_ms=timeout.as_millis() as u64,
            "http.request.start"
        );

        let t0 = Instant::now();
        let resp = rb.send().await.map_err(|err| classify(err, timeout, "send"))?;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| classify(err, timeout, "body"))?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        tracing::debug!(
            %status,
            duration_ms=dur_ms,
            body_len=bytes.len(),
            content_type=%content_type,
            "http.response.headers"
        );
        tracing::trace!(body_snippet=%snip_body(&bytes), "http.response.body_snippet");

        if !status.is_success() {
            return Err(status_error(status, &bytes));
        }

        Ok(decode_utf8(&bytes, &url))
    }
}

// ==============================
// Helpers
// ==============================

fn classify(err: reqwest::Error, timeout: Duration, phase: &'static str) -> FetchError {
    if err.is_timeout() {
        tracing::warn!(phase, timeout_ms = timeout.as_millis() as u64, "http.timeout");
        return FetchError::Timeout(timeout);
    }
    let message = err.to_string();
    tracing::warn!(phase, message=%message, "http.network_error");
    FetchError::Network(message)
}

fn status_error(status: StatusCode, body: &[u8]) -> FetchError {
    let body_snippet = snip_body(body);
    tracing::warn!(%status, body_snippet=%body_snippet, "http.error");
    FetchError::Status {
        code: status.as_u16(),
        body_snippet,
    }
}

fn decode_utf8(bytes: &[u8], url: &Url) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(err) => {
            tracing::debug!(url=%url, valid_up_to=err.valid_up_to(), "http.response.lossy_utf8");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn snip_body(body: &[u8]) -> String {
    let snip = String::from_utf8_lossy(body);
    if snip.len() <= SNIPPET_MAX {
        return snip.into_owned();
    }
    let mut end = SNIPPET_MAX;
    while !snip.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &snip[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_respects_char_boundaries() {
        let body = "ж".repeat(400);
        let snip = snip_body(body.as_bytes());
        assert!(snip.ends_with("..."));
        assert!(snip.len() <= SNIPPET_MAX + 3);
    }

    #[test]
    fn short_bodies_are_not_truncated() {
        assert_eq!(snip_body(b"not found"), "not found");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let url = Url::parse("https://example.test/").unwrap();
        let text = decode_utf8(&[b'o', b'k', 0xff], &url);
        assert_eq!(text, "ok\u{fffd}");
    }
}
