//! Lazy pagination sequence
//!
//! [`Pagination`] describes a listing: its first request and how each raw
//! record maps to a domain value. It performs no I/O. Each call to
//! [`Pagination::cursor`] or [`Pagination::stream`] produces an independent
//! walk that starts over at the first request.
//!
//! A [`PageCursor`] moves through these states:
//!
//! ```text
//! Fresh ─► Fetching(1) ─► Serving(1) ─► Fetching(2) ─► ... ─► Exhausted
//!              │                             │
//!              └──────────► Failed ◄─────────┘
//! ```
//!
//! Pages are fetched only when the previous one has been fully served, and
//! only one page is held in memory. A cursor is advanced through `&mut self`,
//! so one instance is driven by one consumer at a time.

use super::fetcher::PageFetcher;
use super::types::{Continuation, RecordPath};
use crate::error::Result;
use crate::http::{HttpClient, Request};
use crate::types::JsonValue;
use futures::Stream;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maps one raw record to a domain value
pub type Mapper<T> = Arc<dyn Fn(JsonValue) -> Result<T> + Send + Sync>;

/// Type alias for the item stream returned by [`Pagination::stream`]
pub type ItemStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// A restartable, lazily paginated listing
pub struct Pagination<T> {
    fetcher: PageFetcher,
    first: Request,
    mapper: Mapper<T>,
}

impl<T: Send + 'static> Pagination<T> {
    /// Create a pagination starting at `first`, mapping each record with `map`
    pub fn new<F>(client: HttpClient, first: Request, map: F) -> Self
    where
        F: Fn(JsonValue) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            fetcher: PageFetcher::new(client),
            first,
            mapper: Arc::new(map),
        }
    }

    /// Set how the next page is discovered
    #[must_use]
    pub fn with_continuation(mut self, continuation: Continuation) -> Self {
        self.fetcher = self.fetcher.with_continuation(continuation);
        self
    }

    /// Set where records live in each page body
    #[must_use]
    pub fn with_records(mut self, records: RecordPath) -> Self {
        self.fetcher = self.fetcher.with_records(records);
        self
    }

    /// Compose another mapping step after the current one
    pub fn map<U, F>(self, f: F) -> Pagination<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Result<U> + Send + Sync + 'static,
    {
        let inner = self.mapper;
        Pagination {
            fetcher: self.fetcher,
            first: self.first,
            mapper: Arc::new(move |value| inner(value).and_then(&f)),
        }
    }

    /// The request every walk starts from
    pub fn first_request(&self) -> &Request {
        &self.first
    }

    /// Start a fresh walk from the first page
    pub fn cursor(&self) -> PageCursor<T> {
        PageCursor {
            fetcher: self.fetcher.clone(),
            first: self.first.clone(),
            mapper: Arc::clone(&self.mapper),
            state: State::Fresh,
            pages: 0,
        }
    }

    /// Start a fresh walk as a stream.
    ///
    /// A fetch failure is yielded once and ends the stream. A mapping failure
    /// is yielded for that record only and the stream goes on.
    pub fn stream(&self) -> ItemStream<T> {
        Box::pin(futures::stream::unfold(
            self.cursor(),
            |mut cursor| async move {
                match cursor.next().await {
                    Ok(Some(item)) => Some((Ok(item), cursor)),
                    Ok(None) => None,
                    Err(e) => Some((Err(e), cursor)),
                }
            },
        ))
    }

    /// Walk every page from the start and collect all items.
    ///
    /// Stops at the first error of any kind.
    pub async fn collect_all(&self) -> Result<Vec<T>> {
        let mut cursor = self.cursor();
        let mut items = Vec::new();
        while let Some(item) = cursor.next().await? {
            items.push(item);
        }
        Ok(items)
    }
}

impl Pagination<JsonValue> {
    /// Pagination over raw records, unmapped
    pub fn values(client: HttpClient, first: Request) -> Self {
        Self::new(client, first, Ok)
    }
}

impl<T> Clone for Pagination<T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            first: self.first.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

impl<T> fmt::Debug for Pagination<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pagination")
            .field("first", &self.first.url.as_str())
            .finish_non_exhaustive()
    }
}

enum State {
    Fresh,
    Serving {
        records: std::vec::IntoIter<JsonValue>,
        next: Option<Request>,
    },
    Exhausted,
    Failed,
}

/// One forward-only walk over a listing
pub struct PageCursor<T> {
    fetcher: PageFetcher,
    first: Request,
    mapper: Mapper<T>,
    state: State,
    pages: u32,
}

impl<T> PageCursor<T> {
    /// Produce the next item, fetching the next page when the current one is
    /// used up.
    ///
    /// Returns `Ok(None)` once the listing is exhausted, and also on every
    /// call after a fetch failure has been returned.
    pub async fn next(&mut self) -> Result<Option<T>> {
        loop {
            let next_request = match &mut self.state {
                State::Fresh => Some(self.first.clone()),
                State::Serving { records, next } => {
                    if let Some(record) = records.next() {
                        return (self.mapper)(record).map(Some);
                    }
                    next.take()
                }
                State::Exhausted | State::Failed => return Ok(None),
            };

            match next_request {
                Some(request) => self.fetch(request).await?,
                None => {
                    debug!("Pagination exhausted after {} pages", self.pages);
                    self.state = State::Exhausted;
                    return Ok(None);
                }
            }
        }
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages
    }

    /// Check if the walk ended normally
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Exhausted)
    }

    /// Check if the walk ended on a fetch failure
    pub fn is_failed(&self) -> bool {
        matches!(self.state, State::Failed)
    }

    async fn fetch(&mut self, request: Request) -> Result<()> {
        self.pages += 1;
        match self.fetcher.fetch(&request, self.pages).await {
            Ok(page) => {
                self.state = State::Serving {
                    records: page.records.into_iter(),
                    next: page.next,
                };
                Ok(())
            }
            Err(e) => {
                warn!("Pagination failed at page {}: {e}", self.pages);
                self.state = State::Failed;
                Err(e)
            }
        }
    }
}

impl<T> fmt::Debug for PageCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Fresh => "fresh",
            State::Serving { .. } => "serving",
            State::Exhausted => "exhausted",
            State::Failed => "failed",
        };
        f.debug_struct("PageCursor")
            .field("first", &self.first.url.as_str())
            .field("state", &state)
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}
