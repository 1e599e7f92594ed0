//! JSON transport module
//!
//! Uniform helpers for reading and updating a single JSON object over HTTP,
//! and free functions for reading typed fields out of already-parsed objects.

pub mod fields;
mod resource;

pub use resource::JsonResource;
