//! Fetch and patch a single JSON object

use crate::error::Result;
use crate::http::{HttpClient, Request};
use crate::types::{JsonObject, JsonValue, Method};

/// A JSON object living at one URL.
///
/// `fetch` issues exactly one GET and `patch` exactly one PATCH; both
/// require a 200 and never retry.
#[derive(Debug, Clone)]
pub struct JsonResource {
    client: HttpClient,
    request: Request,
}

impl JsonResource {
    /// Create a resource for a request's URL
    pub fn new(client: HttpClient, request: Request) -> Self {
        Self { client, request }
    }

    /// The request this resource is addressed by
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Read the object
    pub async fn fetch(&self) -> Result<JsonObject> {
        let request = self.request.clone().method(Method::GET);
        self.client.expect(&request, 200).await?.json_object()
    }

    /// Apply a partial update
    pub async fn patch(&self, json: JsonObject) -> Result<()> {
        let request = self
            .request
            .clone()
            .method(Method::PATCH)
            .json(JsonValue::Object(json));
        self.client.expect(&request, 200).await?;
        Ok(())
    }
}
