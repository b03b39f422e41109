//! Remote text fetcher abstraction.
//!
//! Every upstream document the mirror consumes (catalog, version, size,
//! digest) is a small text body fetched over HTTP. The [`TextFetcher`] trait
//! keeps the cache and resolver independent of the transport so tests can
//! substitute canned responses; [`HttpFetcher`] is the production
//! implementation.
//!
//! Status interpretation deliberately lives with the caller: a 404 on a
//! version fetch is a normal "not on this channel" signal, not an error.

use std::time::Duration;

use async_trait::async_trait;

use crate::retry::retry_send;

/// Default per-request timeout. Bounds how long a hung upstream can stall
/// a refresh pass.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The body and status of one upstream fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedText {
    /// HTTP status code.
    pub status: u16,
    /// Response body, decoded as text.
    pub body: String,
}

impl FetchedText {
    /// Convenience constructor for a 200 response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the status is the canonical "not published" signal.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Transport-level fetch failure. Anything that produced an HTTP status,
/// including 4xx/5xx, is a [`FetchedText`], not a `FetchError`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("fetch of {url} failed: {reason}")]
pub struct FetchError {
    /// The URL the fetch was issued against.
    pub url: String,
    /// Underlying client error description.
    pub reason: String,
}

/// Fetches a text document from a URL.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    /// Fetch `url`, returning the body and status, or a transport error.
    async fn get(&self, url: &str) -> Result<FetchedText, FetchError>;
}

/// Production fetcher: reqwest with a per-request timeout and exponential
/// backoff retry on transport failures.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Build a fetcher with an explicit per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError {
                url: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TextFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchedText, FetchError> {
        let resp = retry_send(|| self.client.get(url).send())
            .await
            .map_err(|e| FetchError {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| FetchError {
            url: url.to_string(),
            reason: format!("failed to read body: {e}"),
        })?;

        Ok(FetchedText { status, body })
    }
}

/// Canned-response fetcher shared by the cache and resolver tests.
///
/// Unregistered URLs answer 404 with an empty body, matching how the
/// upstream responds for unpublished packages.
#[cfg(test)]
pub(crate) struct StubFetcher {
    responses: parking_lot::Mutex<std::collections::HashMap<String, Result<FetchedText, FetchError>>>,
}

#[cfg(test)]
impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self {
            responses: parking_lot::Mutex::new(std::collections::HashMap::new()),
        }
    }

    pub(crate) fn ok(self, url: &str, body: &str) -> Self {
        self.insert(url, Ok(FetchedText::ok(body)));
        self
    }

    pub(crate) fn status(self, url: &str, status: u16, body: &str) -> Self {
        self.insert(
            url,
            Ok(FetchedText {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    pub(crate) fn transport_error(self, url: &str) -> Self {
        self.insert(
            url,
            Err(FetchError {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        );
        self
    }

    /// Replace a response after construction, for multi-refresh scenarios.
    pub(crate) fn insert(&self, url: &str, response: Result<FetchedText, FetchError>) {
        self.responses.lock().insert(url.to_string(), response);
    }

    pub(crate) fn remove(&self, url: &str) {
        self.responses.lock().remove(url);
    }
}

#[cfg(test)]
#[async_trait]
impl TextFetcher for StubFetcher {
    async fn get(&self, url: &str) -> Result<FetchedText, FetchError> {
        match self.responses.lock().get(url) {
            Some(response) => response.clone(),
            None => Ok(FetchedText {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn status_predicates() {
        assert!(FetchedText::ok("x").is_success());
        assert!(!FetchedText::ok("x").is_not_found());
        let nf = FetchedText {
            status: 404,
            body: String::new(),
        };
        assert!(nf.is_not_found());
        assert!(!nf.is_success());
    }

    #[tokio::test]
    async fn http_fetcher_returns_body_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases/stable/users.amd64.version"))
            .respond_with(ResponseTemplate::new(200).set_body_string("272"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/releases/stable/users.amd64.version", server.uri());
        let fetched = fetcher.get(&url).await.unwrap();
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body, "272");
    }

    #[tokio::test]
    async fn http_fetcher_passes_404_through_without_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let fetched = fetcher
            .get(&format!("{}/releases/stable/missing.amd64.version", server.uri()))
            .await
            .unwrap();
        assert!(fetched.is_not_found());
    }

    #[tokio::test]
    async fn stub_fetcher_defaults_to_not_found() {
        let stub = StubFetcher::new();
        let fetched = stub.get("http://host/anything").await.unwrap();
        assert!(fetched.is_not_found());
    }
}
