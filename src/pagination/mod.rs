//! Pagination module
//!
//! Lazily walks multi-page list endpoints.
//!
//! # Overview
//!
//! - [`PageFetcher`] issues one GET and returns a [`Page`]: the records of
//!   that page plus the request for the next one, if the server advertises it
//! - [`Pagination`] is a restartable description of a listing; every
//!   [`Pagination::cursor`] or [`Pagination::stream`] call starts over at the
//!   first request
//! - [`PageCursor`] walks pages on demand, one page in memory at a time
//!
//! Next pages are discovered from an RFC 5988 `Link` header by default, or
//! from a URL embedded in the body for APIs that do that instead.

mod fetcher;
pub mod link;
mod sequence;
mod types;

pub use fetcher::PageFetcher;
pub use link::{find_rel, parse_links, Link};
pub use sequence::{ItemStream, Mapper, PageCursor, Pagination};
pub use types::{Continuation, Page, RecordPath};

#[cfg(test)]
mod tests;
