//! API entry point

use super::bindings::{Gists, Organization, User};
use super::collection::{Collection, Item};
use super::entry::{Entry, Listable, Removable};
use super::kind;
use super::repo::{repo_listing, user_listing, Coordinates, Repo};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::json::fields;
use crate::pagination::Pagination;
use crate::types::{JsonObject, JsonValue, Method};
use serde_json::json;

/// Root of the API
#[derive(Debug, Clone)]
pub struct Github {
    client: HttpClient,
    root: Entry,
}

impl Github {
    /// Connect to the API described by `config`
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_client(HttpClient::with_config(config)?))
    }

    /// Use an existing HTTP client
    pub fn with_client(client: HttpClient) -> Self {
        let root = Entry::root(&client);
        Self { client, root }
    }

    /// Get the HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// The entry point itself
    pub fn entry(&self) -> &Entry {
        &self.root
    }

    /// Shorthand for `repos().get(coords)`
    pub fn repo(&self, coords: Coordinates) -> Repo {
        Repo::new(&self.root, coords)
    }

    pub fn repos(&self) -> Repos {
        Repos {
            root: self.root.clone(),
        }
    }

    pub fn users(&self) -> Users {
        Users {
            root: self.root.clone(),
        }
    }

    pub fn organizations(&self) -> Organizations {
        Organizations {
            root: self.root.clone(),
        }
    }

    pub fn gists(&self) -> Gists {
        Collection::under(&self.root)
    }

    /// Render markdown to HTML
    pub async fn markdown(&self, text: &str) -> Result<String> {
        let body = json!({ "text": text, "mode": "markdown" });
        let response = self
            .root
            .child("markdown")
            .send(Method::POST, Some(body), &[200])
            .await?;
        Ok(response.body)
    }

    /// Current rate limit status
    pub async fn rate_limit(&self) -> Result<JsonObject> {
        self.root.child("rate_limit").resource().fetch().await
    }
}

/// All repositories
#[derive(Debug, Clone)]
pub struct Repos {
    root: Entry,
}

impl Repos {
    /// Handle on one repository. Performs no I/O.
    pub fn get(&self, coords: Coordinates) -> Repo {
        Repo::new(&self.root, coords)
    }

    /// Create a repository owned by the current user
    pub async fn create(&self, json: JsonObject) -> Result<Repo> {
        let response = self
            .root
            .path("user/repos")
            .send(Method::POST, Some(JsonValue::Object(json)), &[201])
            .await?;
        let coords = Coordinates::from_json(&response.json_object()?)?;
        Ok(self.get(coords))
    }

    /// Delete a repository
    pub async fn remove(&self, coords: Coordinates) -> Result<()> {
        self.get(coords).remove().await
    }

    /// Every public repository, in the order they were created, starting
    /// after repository id `since`
    pub fn iterate(&self, since: Option<u64>) -> Pagination<Repo> {
        let since = since.map(|id| id.to_string());
        let params: Vec<(&str, &str)> = since.iter().map(|s| ("since", s.as_str())).collect();
        repo_listing(&self.root, &self.root.child("repositories"), &params)
    }
}

/// All users
#[derive(Debug, Clone)]
pub struct Users {
    root: Entry,
}

impl Users {
    /// Handle on one user. Performs no I/O.
    pub fn get(&self, login: &str) -> User {
        Item::new(self.root.child("users").child(login), login.to_string())
    }

    /// The authenticated user
    pub async fn me(&self) -> Result<User> {
        let json = self.root.child("user").resource().fetch().await?;
        Ok(self.get(fields::text(&json, "login")?))
    }

    /// Every user, in sign-up order, starting after user id `since`
    pub fn iterate(&self, since: Option<u64>) -> Pagination<User> {
        let since = since.map(|id| id.to_string());
        let params: Vec<(&str, &str)> = since.iter().map(|s| ("since", s.as_str())).collect();
        user_listing(&self.root, &self.root.child("users"), &params)
    }
}

/// Organizations
#[derive(Debug, Clone)]
pub struct Organizations {
    root: Entry,
}

impl Organizations {
    /// Handle on one organization. Performs no I/O.
    pub fn get(&self, login: &str) -> Organization {
        Item::new(self.root.child("orgs").child(login), login.to_string())
    }

    /// Organizations of the authenticated user
    pub fn iterate(&self) -> Pagination<Organization> {
        Collection::<kind::Organization>::with_items(
            self.root.path("user/orgs"),
            self.root.child("orgs"),
        )
        .iterate(&[])
    }
}
