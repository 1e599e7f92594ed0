//! Pagination types
//!
//! Defines how records and next-page pointers are located in a response.

use crate::http::Request;
use crate::types::JsonValue;

/// One fetched page. Immutable once fetched.
#[derive(Debug, Clone)]
pub struct Page {
    /// Records in server order
    pub records: Vec<JsonValue>,
    /// Request for the following page, if any
    pub next: Option<Request>,
}

impl Page {
    /// Check if this is the last page
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if this page has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// How the next page is discovered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Link header pagination (RFC 5988)
    LinkHeader {
        /// Rel value to follow (default: "next")
        rel: String,
    },

    /// Next URL in an object body, records alongside it
    BodyCursor {
        /// Dotted path to the next URL (e.g. "pagination.next")
        next_path: String,
        /// Dotted path to the records array (e.g. "items")
        items_path: String,
    },
}

impl Default for Continuation {
    fn default() -> Self {
        Self::LinkHeader {
            rel: "next".to_string(),
        }
    }
}

impl Continuation {
    /// Create link header continuation for a rel
    pub fn link_header(rel: impl Into<String>) -> Self {
        Self::LinkHeader { rel: rel.into() }
    }

    /// Create body cursor continuation
    pub fn body_cursor(next_path: impl Into<String>, items_path: impl Into<String>) -> Self {
        Self::BodyCursor {
            next_path: next_path.into(),
            items_path: items_path.into(),
        }
    }
}

/// Where the records of a page live in its body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordPath {
    /// The body itself is the array of records
    #[default]
    Root,

    /// The array sits under a member of an object body (e.g. search "items")
    Member(String),
}

impl RecordPath {
    /// Create a member record path
    pub fn member(path: impl Into<String>) -> Self {
        Self::Member(path.into())
    }
}
