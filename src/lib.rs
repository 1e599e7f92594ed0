// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # forge-rest
//!
//! A lazy, paginated client for source-forge REST APIs shaped like GitHub v3.
//!
//! ## Features
//!
//! - **JSON transport**: fetch and patch single objects with strict status checks
//! - **Link header pagination**: follows RFC 5988 `rel="next"` links page by page
//! - **Lazy sequences**: pages are fetched only when consumed, and every walk
//!   can be restarted from the first page
//! - **Typed bindings**: repositories, issues, pulls, labels, gists, users and more
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use forge_rest::config::ClientConfig;
//! use forge_rest::resources::{Github, Listable, Readable};
//!
//! #[tokio::main]
//! async fn main() -> forge_rest::Result<()> {
//!     let github = Github::new(ClientConfig::default())?;
//!     let repo = github.repo("octocat/hello-world".parse()?);
//!
//!     let mut issues = repo.issues().iterate(&[("state", "open")]).cursor();
//!     while let Some(issue) = issues.next().await? {
//!         println!("#{}: {}", issue.id(), issue.json().await?["title"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        Resource bindings                      │
//! │  Github → Repo → Collection<K> → Item<K>   (Readable, ...)    │
//! └───────────────────────────────────────────────────────────────┘
//!                 │                               │
//! ┌───────────────┴───────────────┐ ┌─────────────┴───────────────┐
//! │  Pagination / PageCursor      │ │  JsonResource               │
//! │  PageFetcher + Link parser    │ │  fetch (200) / patch (200)  │
//! └───────────────┬───────────────┘ └─────────────┬───────────────┘
//!                 └───────────────┬───────────────┘
//!                       HttpClient (reqwest)
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// HTTP request, response and client
pub mod http;

/// JSON transport helper and field readers
pub mod json;

/// Link header pagination and lazy sequences
pub mod pagination;

/// Typed resource bindings
pub mod resources;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::ClientConfig;
pub use pagination::{PageCursor, Pagination};
pub use resources::Github;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
