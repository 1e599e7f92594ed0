//! Fully-read HTTP response

use crate::error::{Error, Result};
use crate::json::fields::kind_of;
use crate::types::{JsonObject, JsonValue};
use reqwest::header::HeaderMap;
use url::Url;

/// An HTTP response whose body has already been read
#[derive(Debug, Clone)]
pub struct Response {
    /// Status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Body text
    pub body: String,
    /// URL that produced this response
    pub url: Url,
}

impl Response {
    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Return the response if its status is `expected`, otherwise a transport error
    pub fn assert_status(self, expected: u16) -> Result<Self> {
        self.assert_any(&[expected])
    }

    /// Return the response if its status is one of `expected`
    pub fn assert_any(self, expected: &[u16]) -> Result<Self> {
        if expected.contains(&self.status) {
            Ok(self)
        } else {
            Err(Error::transport(self.status, self.body))
        }
    }

    /// All values of a header, in the order received
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Parse the body as any JSON value
    pub fn json_value(&self) -> Result<JsonValue> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Parse the body as a JSON object
    pub fn json_object(&self) -> Result<JsonObject> {
        match self.json_value()? {
            JsonValue::Object(map) => Ok(map),
            other => Err(Error::malformed(
                "$",
                format!("expected an object, got {}", kind_of(&other)),
            )),
        }
    }

    /// Parse the body as a JSON array
    pub fn json_array(&self) -> Result<Vec<JsonValue>> {
        match self.json_value()? {
            JsonValue::Array(items) => Ok(items),
            other => Err(Error::malformed(
                "$",
                format!("expected an array, got {}", kind_of(&other)),
            )),
        }
    }
}
