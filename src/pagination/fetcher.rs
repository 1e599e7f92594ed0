//! Page fetcher
//!
//! Issues exactly one GET per call and splits the response into the page's
//! records and the request for the next page.

use super::link::find_rel;
use super::types::{Continuation, Page, RecordPath};
use crate::error::{Error, Result};
use crate::http::{HttpClient, Request, Response};
use crate::json::fields::{self, kind_of};
use crate::types::{JsonValue, Method};
use tracing::debug;
use url::Url;

/// Fetches single pages of a listing
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: HttpClient,
    continuation: Continuation,
    records: RecordPath,
}

impl PageFetcher {
    /// Create a fetcher following `Link: <...>; rel="next"` over array bodies
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            continuation: Continuation::default(),
            records: RecordPath::default(),
        }
    }

    /// Set how the next page is discovered.
    ///
    /// A body cursor also points records at its `items_path`; a later
    /// [`with_records`](Self::with_records) still overrides that.
    #[must_use]
    pub fn with_continuation(mut self, continuation: Continuation) -> Self {
        if let Continuation::BodyCursor { items_path, .. } = &continuation {
            self.records = RecordPath::member(items_path.clone());
        }
        self.continuation = continuation;
        self
    }

    /// Set where records live in the body
    #[must_use]
    pub fn with_records(mut self, records: RecordPath) -> Self {
        self.records = records;
        self
    }

    /// Get the HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Fetch one page. `page` is the 1-based page number, used for diagnostics.
    pub async fn fetch(&self, request: &Request, page: u32) -> Result<Page> {
        let request = request.clone().method(Method::GET);
        let response = self.client.send(&request).await?;

        if !response.is_success() {
            return Err(Error::page_fetch(response.status, response.body, page));
        }

        // A blank body is an empty page whatever the record path
        let blank = response.body.trim().is_empty();
        let mut body = if blank {
            JsonValue::Null
        } else {
            response.json_value()?
        };

        let next = self
            .next_url(&response, &body)?
            .map(|url| request.clone().uri(url));
        let records = if blank {
            Vec::new()
        } else {
            self.take_records(&mut body)?
        };

        debug!(
            "Page {page}: {} records from {}, next: {}",
            records.len(),
            request.url,
            next.as_ref().map_or("none", |r| r.url.as_str())
        );

        Ok(Page { records, next })
    }

    /// Locate the next page's URL, resolved against the response URL
    fn next_url(&self, response: &Response, body: &JsonValue) -> Result<Option<Url>> {
        let target = match &self.continuation {
            Continuation::LinkHeader { rel } => find_rel(response.header_values("link"), rel),
            Continuation::BodyCursor { next_path, .. } => fields::lookup(body, next_path)
                .and_then(JsonValue::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
        };

        match target {
            Some(target) => Ok(Some(response.url.join(&target)?)),
            None => Ok(None),
        }
    }

    /// Move the records array out of the body
    fn take_records(&self, body: &mut JsonValue) -> Result<Vec<JsonValue>> {
        let (field, value) = match &self.records {
            RecordPath::Root => ("$", body.take()),
            RecordPath::Member(path) => (
                path.as_str(),
                body.pointer_mut(&fields::pointer(path))
                    .map(JsonValue::take)
                    .unwrap_or(JsonValue::Null),
            ),
        };

        match value {
            JsonValue::Array(records) => Ok(records),
            other => Err(Error::malformed(
                field,
                format!("expected an array of records, got {}", kind_of(&other)),
            )),
        }
    }
}
