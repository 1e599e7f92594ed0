//! Incremental request builder
//!
//! A [`Request`] is a value: every builder call consumes it and returns the
//! modified copy, so a paginated listing can keep its first request around
//! and restart from it at any time.

use crate::error::Result;
use crate::types::{JsonValue, Method, StringMap};
use std::fmt;
use url::Url;

/// A single HTTP request, not yet sent
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Absolute target URL, query string included
    pub url: Url,
    /// Request headers
    pub headers: StringMap,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
}

impl Request {
    /// Create a GET request for a URL
    pub fn new(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: StringMap::new(),
            body: None,
        }
    }

    /// Create a GET request by parsing a URL
    pub fn parse(url: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(url)?))
    }

    /// Set the HTTP method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Append a slash-separated path, one segment per component.
    ///
    /// Empty components are skipped, so `"/repos/o/r/"` appends three segments.
    #[must_use]
    pub fn path(self, path: &str) -> Self {
        path.split('/')
            .filter(|s| !s.is_empty())
            .fold(self, Self::segment)
    }

    /// Append exactly one path segment, percent-encoding any `/` inside it
    #[must_use]
    pub fn segment(mut self, segment: &str) -> Self {
        if let Ok(mut segments) = self.url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        self
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.url
            .query_pairs_mut()
            .append_pair(key, &value.to_string());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Retarget the request at another URL, keeping method and headers
    #[must_use]
    pub fn uri(mut self, url: Url) -> Self {
        self.url = url;
        self
    }

    /// The value of a query parameter, if present
    pub fn query_value(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
