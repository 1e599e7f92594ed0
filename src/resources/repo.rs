//! Repository bindings

use super::collection::{Collection, Item};
use super::entry::{Entry, Listable, Patchable, Readable, Removable};
use super::kind;
use crate::error::{Error, Result};
use crate::json::fields;
use crate::pagination::Pagination;
use crate::types::{JsonObject, Method};
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$").expect("coordinates pattern is valid")
});

/// `owner/name` of a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinates {
    owner: String,
    name: String,
}

impl Coordinates {
    /// Build coordinates from their two parts
    pub fn new(owner: &str, name: &str) -> Result<Self> {
        format!("{owner}/{name}").parse()
    }

    /// Read coordinates from the `full_name` field of a repository record
    pub fn from_json(json: &JsonObject) -> Result<Self> {
        let full_name = fields::text(json, "full_name")?;
        full_name
            .parse()
            .map_err(|e: Error| Error::malformed("full_name", e.to_string()))
    }

    /// Owner login
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = COORDINATES
            .captures(s.trim())
            .ok_or_else(|| Error::InvalidCoordinates {
                value: s.to_string(),
            })?;
        Ok(Self {
            owner: caps[1].to_string(),
            name: caps[2].to_string(),
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Lazily list repository records under `list`, as [`Repo`] handles
pub(crate) fn repo_listing(root: &Entry, list: &Entry, params: &[(&str, &str)]) -> Pagination<Repo> {
    let root = root.clone();
    list.listing(params, move |value| {
        let coords = Coordinates::from_json(&fields::into_object(value)?)?;
        Ok(Repo::new(&root, coords))
    })
}

/// Lazily list user records under `list`, as handles at `/users/{login}`
pub(crate) fn user_listing(
    root: &Entry,
    list: &Entry,
    params: &[(&str, &str)],
) -> Pagination<Item<kind::User>> {
    Collection::<kind::User>::with_items(list.clone(), root.child("users")).iterate(params)
}

/// One repository at `/repos/{owner}/{name}`
#[derive(Debug, Clone)]
pub struct Repo {
    root: Entry,
    entry: Entry,
    coords: Coordinates,
}

impl Repo {
    /// Handle on a repository below the API entry point. Performs no I/O.
    pub fn new(root: &Entry, coords: Coordinates) -> Self {
        let entry = root
            .child("repos")
            .child(coords.owner())
            .child(coords.name());
        Self {
            root: root.clone(),
            entry,
            coords,
        }
    }

    /// The repository's coordinates
    pub fn coordinates(&self) -> &Coordinates {
        &self.coords
    }

    pub fn issues(&self) -> Collection<kind::Issue> {
        Collection::under(&self.entry)
    }

    /// Comments across all issues of the repository
    pub fn issue_comments(&self) -> Collection<kind::IssueComment> {
        Collection::new(self.entry.path("issues/comments"))
    }

    pub fn pulls(&self) -> Collection<kind::Pull> {
        Collection::under(&self.entry)
    }

    pub fn labels(&self) -> Collection<kind::Label> {
        Collection::under(&self.entry)
    }

    pub fn milestones(&self) -> Collection<kind::Milestone> {
        Collection::under(&self.entry)
    }

    pub fn releases(&self) -> Collection<kind::Release> {
        Collection::under(&self.entry)
    }

    pub fn hooks(&self) -> Collection<kind::Hook> {
        Collection::under(&self.entry)
    }

    /// Deploy keys
    pub fn keys(&self) -> Collection<kind::DeployKey> {
        Collection::under(&self.entry)
    }

    pub fn commits(&self) -> Collection<kind::Commit> {
        Collection::under(&self.entry)
    }

    /// Commits matching a query, newest first
    pub fn log(&self, query: &CommitQuery) -> Pagination<Item<kind::Commit>> {
        let params = query.params();
        let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.commits().iterate(&params)
    }

    pub fn forks(&self) -> Forks {
        Forks {
            root: self.root.clone(),
            entry: self.entry.child("forks"),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            root: self.root.clone(),
            entry: self.entry.child("collaborators"),
        }
    }
}

impl Readable for Repo {
    fn entry(&self) -> &Entry {
        &self.entry
    }
}

impl Patchable for Repo {}

impl Removable for Repo {}

impl PartialEq for Repo {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords && self.entry.request().url == other.entry.request().url
    }
}

/// Forks of a repository
#[derive(Debug, Clone)]
pub struct Forks {
    root: Entry,
    entry: Entry,
}

impl Forks {
    /// Fork into the current user's account, or into `organization`.
    ///
    /// Forking is asynchronous on the server side, which answers 202.
    pub async fn create(&self, organization: Option<&str>) -> Result<Repo> {
        let body = match organization {
            Some(org) => json!({ "organization": org }),
            None => json!({}),
        };
        let response = self.entry.send(Method::POST, Some(body), &[202]).await?;
        let coords = Coordinates::from_json(&response.json_object()?)?;
        Ok(Repo::new(&self.root, coords))
    }
}

impl Listable for Forks {
    type Item = Repo;

    fn iterate(&self, params: &[(&str, &str)]) -> Pagination<Repo> {
        repo_listing(&self.root, &self.entry, params)
    }
}

/// Collaborators of a repository
#[derive(Debug, Clone)]
pub struct Collaborators {
    root: Entry,
    entry: Entry,
}

impl Collaborators {
    /// Invite a user. 201 means an invitation was sent, 204 that the user
    /// already had access.
    pub async fn add(&self, login: &str) -> Result<()> {
        self.entry.child(login).send(Method::PUT, None, &[201, 204]).await?;
        Ok(())
    }

    /// Revoke a user's access
    pub async fn remove(&self, login: &str) -> Result<()> {
        self.entry.child(login).send(Method::DELETE, None, &[204]).await?;
        Ok(())
    }

    /// Check if a user is a collaborator
    pub async fn is_collaborator(&self, login: &str) -> Result<bool> {
        self.entry.child(login).check().await
    }
}

impl Listable for Collaborators {
    type Item = Item<kind::User>;

    fn iterate(&self, params: &[(&str, &str)]) -> Pagination<Item<kind::User>> {
        user_listing(&self.root, &self.entry, params)
    }
}

/// Filters for listing commits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitQuery {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub path: Option<String>,
    /// Branch name or SHA to start listing from
    pub sha: Option<String>,
}

impl CommitQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    #[must_use]
    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn sha(mut self, sha: impl Into<String>) -> Self {
        self.sha = Some(sha.into());
        self
    }

    /// Query parameters, timestamps in ISO-8601 UTC
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let stamp = |t: &DateTime<Utc>| t.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut params = Vec::new();
        if let Some(since) = &self.since {
            params.push(("since", stamp(since)));
        }
        if let Some(until) = &self.until {
            params.push(("until", stamp(until)));
        }
        if let Some(author) = &self.author {
            params.push(("author", author.clone()));
        }
        if let Some(path) = &self.path {
            params.push(("path", path.clone()));
        }
        if let Some(sha) = &self.sha {
            params.push(("sha", sha.clone()));
        }
        params
    }
}

