//! Error types for forge-rest
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for forge-rest
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("HTTP {status} while fetching page {page}: {body}")]
    PageFetch { status: u16, body: String, page: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Shape Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Malformed response at '{field}': {message}")]
    MalformedResponse { field: String, message: String },

    // ============================================================================
    // Addressing Errors
    // ============================================================================
    #[error("Invalid repository coordinates '{value}', expected 'owner/name'")]
    InvalidCoordinates { value: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a transport error for an unexpected status
    pub fn transport(status: u16, body: impl Into<String>) -> Self {
        Self::Transport {
            status,
            body: body.into(),
        }
    }

    /// Create a page fetch error
    pub fn page_fetch(status: u16, body: impl Into<String>, page: u32) -> Self {
        Self::PageFetch {
            status,
            body: body.into(),
            page,
        }
    }

    /// Create a malformed response error
    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from an unexpected HTTP status.
    ///
    /// Page fetch failures are a specialization of transport failures, so
    /// both variants answer `true`.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::PageFetch { .. })
    }

    /// The HTTP status carried by a transport or page fetch error
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } | Error::PageFetch { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The response body carried by a transport or page fetch error
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Transport { body, .. } | Error::PageFetch { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if this error is a malformed response
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedResponse { .. })
    }
}

/// Result type alias for forge-rest
pub type Result<T> = std::result::Result<T, Error>;
