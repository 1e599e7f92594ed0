//! HTTP client module
//!
//! The collaborator every other module talks to: an incremental request
//! builder, a fully-read response, and a client that performs exactly one
//! round trip per call.
//!
//! # Features
//!
//! - **Incremental URIs**: Append path segments and query pairs to a base URL
//! - **Default Headers**: Accept, user agent and configured headers on every call
//! - **Status Assertions**: Turn unexpected statuses into transport errors

mod client;
mod request;
mod response;

pub use client::HttpClient;
pub use request::Request;
pub use response::Response;
