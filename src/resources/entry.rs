//! Addressing and capability traits

use crate::error::{Error, Result};
use crate::http::{HttpClient, Request, Response};
use crate::json::JsonResource;
use crate::pagination::Pagination;
use crate::types::{JsonObject, JsonValue, Method};
use async_trait::async_trait;
use std::fmt;

/// A client bound to one URL of the API.
///
/// Every binding holds an `Entry`; moving around the API tree is a matter
/// of appending or dropping path segments.
#[derive(Clone)]
pub struct Entry {
    client: HttpClient,
    request: Request,
}

impl Entry {
    /// Create an entry for a request's URL
    pub fn new(client: HttpClient, request: Request) -> Self {
        Self { client, request }
    }

    /// The API entry point itself
    pub fn root(client: &HttpClient) -> Self {
        Self::new(client.clone(), Request::new(client.base_url().clone()))
    }

    /// Get the HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Get the request addressing this entry
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Descend by one path segment.
    ///
    /// The segment is percent-encoded as a unit, so a label named `a/b`
    /// stays one segment.
    #[must_use]
    pub fn child(&self, segment: impl fmt::Display) -> Self {
        let request = self.request.clone().segment(&segment.to_string());
        Self::new(self.client.clone(), request)
    }

    /// Descend by a slash-separated path
    #[must_use]
    pub fn path(&self, path: &str) -> Self {
        Self::new(self.client.clone(), self.request.clone().path(path))
    }

    /// Go up one path segment, dropping any query string
    #[must_use]
    pub fn parent(&self) -> Self {
        let mut url = self.request.url.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().pop();
        }
        Self::new(self.client.clone(), self.request.clone().uri(url))
    }

    /// The JSON object at this entry
    pub fn resource(&self) -> JsonResource {
        JsonResource::new(self.client.clone(), self.request.clone())
    }

    /// A listing at this entry, with the configured page size and `params`
    /// added to the first request
    pub fn listing<T, F>(&self, params: &[(&str, &str)], map: F) -> Pagination<T>
    where
        T: Send + 'static,
        F: Fn(JsonValue) -> Result<T> + Send + Sync + 'static,
    {
        let mut first = self.request.clone().method(Method::GET);
        if let Some(size) = self.client.config().per_page {
            if !params.iter().any(|(key, _)| *key == "per_page") {
                first = first.query("per_page", size);
            }
        }
        for (key, value) in params {
            first = first.query(key, value);
        }
        Pagination::new(self.client.clone(), first, map)
    }

    /// Send one request to this entry and require one of `expected`
    pub async fn send(
        &self,
        method: Method,
        body: Option<JsonValue>,
        expected: &[u16],
    ) -> Result<Response> {
        let mut request = self.request.clone().method(method);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.client.send(&request).await?.assert_any(expected)
    }

    /// Ask a yes/no question the API answers with 204 or 404
    pub async fn check(&self) -> Result<bool> {
        let response = self.client.send(&self.request.clone().method(Method::GET)).await?;
        match response.status {
            204 => Ok(true),
            404 => Ok(false),
            status => Err(Error::transport(status, response.body)),
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry").field(&self.request.url.as_str()).finish()
    }
}

/// A resource whose JSON can be read
#[async_trait]
pub trait Readable: Send + Sync {
    /// Where the resource lives
    fn entry(&self) -> &Entry;

    /// Fetch the resource's JSON object
    async fn json(&self) -> Result<JsonObject> {
        self.entry().resource().fetch().await
    }
}

/// A resource accepting partial updates
#[async_trait]
pub trait Patchable: Readable {
    /// Apply a partial update
    async fn patch(&self, json: JsonObject) -> Result<()> {
        self.entry().resource().patch(json).await
    }
}

/// A resource that can be deleted
#[async_trait]
pub trait Removable: Readable {
    /// Delete the resource; the API answers 204
    async fn remove(&self) -> Result<()> {
        self.entry().send(Method::DELETE, None, &[204]).await?;
        Ok(())
    }
}

/// A collection that can be walked page by page
pub trait Listable {
    /// What each record maps to
    type Item: Send + 'static;

    /// Lazily iterate the collection with extra query parameters
    fn iterate(&self, params: &[(&str, &str)]) -> Pagination<Self::Item>;
}

/// A collection new members can be posted to
#[async_trait]
pub trait Creatable: Send + Sync {
    /// What a successful create returns
    type Item;

    /// Create a member; the API answers 201 with the new member's JSON
    async fn create(&self, json: JsonObject) -> Result<Self::Item>;
}
