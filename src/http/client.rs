//! HTTP client
//!
//! Performs one round trip per call:
//! - Default headers from the client configuration
//! - Request headers, query string and JSON body from the [`Request`]
//! - Body read fully into the returned [`Response`]
//!
//! No status is an error at this level and nothing is retried; callers
//! decide which statuses they accept.

use super::request::Request;
use super::response::Response;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// HTTP client bound to one API entry point.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: Arc<ClientConfig>,
    base: Url,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let base = config.base()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            config: Arc::new(config),
            base,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the API entry point
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Start a GET request at a path below the entry point
    pub fn request(&self, path: &str) -> Request {
        Request::new(self.base.clone()).path(path)
    }

    /// Send a request and read the whole response
    pub async fn send(&self, request: &Request) -> Result<Response> {
        let overridden =
            |name: &str| request.headers.keys().any(|k| k.eq_ignore_ascii_case(name));
        let configured = |name: &str| {
            self.config
                .headers
                .keys()
                .any(|k| k.eq_ignore_ascii_case(name))
        };

        let mut req = self
            .client
            .request(request.method.into(), request.url.clone());

        if !overridden("accept") && !configured("accept") {
            req = req.header(reqwest::header::ACCEPT, self.config.accept.as_str());
        }

        // Add default headers
        for (key, value) in &self.config.headers {
            if !overridden(key) {
                req = req.header(key.as_str(), value.as_str());
            }
        }

        // Add request-specific headers
        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add body
        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response.text().await?;

        debug!("{} {} -> {}", request.method, request.url, status);

        Ok(Response {
            status,
            headers,
            body,
            url,
        })
    }

    /// Send a request and require an exact status
    pub async fn expect(&self, request: &Request, status: u16) -> Result<Response> {
        self.send(request).await?.assert_status(status)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base", &self.base.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
