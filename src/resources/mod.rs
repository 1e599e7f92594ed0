//! Resource bindings
//!
//! Typed handles over the API's resources, built from a few capability
//! traits and two generic types instead of one hand-written pair per
//! resource:
//!
//! - [`Collection<K>`] is a listing endpoint: `get`, `iterate`, `create`, `remove`
//! - [`Item<K>`] is one entity below it: `json`, plus `patch` and `remove`
//!   when `K` is [`Mutable`]
//! - a [`Kind`] names the path segment and the JSON field carrying the id
//!
//! Handles are cheap and perform no I/O until an operation is awaited.
//!
//! # Example
//!
//! ```rust,ignore
//! use forge_rest::resources::{Github, Listable, Readable};
//!
//! let github = Github::new(ClientConfig::default())?;
//! let repo = github.repo("octocat/hello-world".parse()?);
//! let mut issues = repo.issues().iterate(&[("state", "open")]).cursor();
//! while let Some(issue) = issues.next().await? {
//!     println!("#{} {}", issue.id(), issue.json().await?["title"]);
//! }
//! ```

mod bindings;
mod collection;
mod entry;
mod github;
pub mod kind;
mod repo;

pub use bindings::*;
pub use collection::{Collection, Identity, Item, Kind, Mutable};
pub use entry::{Creatable, Entry, Listable, Patchable, Readable, Removable};
pub use github::{Github, Organizations, Repos, Users};
pub use repo::{Collaborators, CommitQuery, Coordinates, Forks, Repo};
