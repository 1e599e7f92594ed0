//! Named bindings and their kind-specific operations

use super::collection::{Collection, Item};
use super::entry::{Creatable, Entry, Readable};
use super::kind;
use super::repo::{repo_listing, user_listing, Repo};
use crate::error::Result;
use crate::json::fields;
use crate::pagination::Pagination;
use crate::types::{JsonObject, JsonValue, Method};
use serde_json::json;

pub type Issues = Collection<kind::Issue>;
pub type Issue = Item<kind::Issue>;
pub type IssueComments = Collection<kind::IssueComment>;
pub type IssueComment = Item<kind::IssueComment>;
pub type IssueEvents = Collection<kind::IssueEvent>;
pub type IssueEvent = Item<kind::IssueEvent>;
pub type Labels = Collection<kind::Label>;
pub type Label = Item<kind::Label>;
pub type Milestones = Collection<kind::Milestone>;
pub type Milestone = Item<kind::Milestone>;
pub type Pulls = Collection<kind::Pull>;
pub type Pull = Item<kind::Pull>;
pub type PullComments = Collection<kind::PullComment>;
pub type PullComment = Item<kind::PullComment>;
pub type Releases = Collection<kind::Release>;
pub type Release = Item<kind::Release>;
pub type ReleaseAssets = Collection<kind::ReleaseAsset>;
pub type ReleaseAsset = Item<kind::ReleaseAsset>;
pub type Hooks = Collection<kind::Hook>;
pub type Hook = Item<kind::Hook>;
pub type Commits = Collection<kind::Commit>;
pub type Commit = Item<kind::Commit>;
pub type DeployKeys = Collection<kind::DeployKey>;
pub type DeployKey = Item<kind::DeployKey>;
pub type Gists = Collection<kind::Gist>;
pub type Gist = Item<kind::Gist>;
pub type GistComments = Collection<kind::GistComment>;
pub type GistComment = Item<kind::GistComment>;
pub type Organization = Item<kind::Organization>;
pub type User = Item<kind::User>;

/// Listed below `entry/<segment>`, addressed as siblings of `entry`,
/// like `/issues/5/comments` against `/issues/comments/{id}`
fn nested<K: super::Kind>(entry: &Entry, segment: &str) -> Collection<K> {
    Collection::with_items(entry.child(segment), entry.parent().child(segment))
}

impl Issue {
    pub fn comments(&self) -> IssueComments {
        nested(self.entry(), "comments")
    }

    pub fn events(&self) -> IssueEvents {
        nested(self.entry(), "events")
    }

    /// Labels on this issue, addressed as repository labels
    pub fn labels(&self) -> Labels {
        let entry = self.entry();
        Collection::with_items(entry.child("labels"), entry.parent().parent().child("labels"))
    }

    /// Attach labels by name
    pub async fn add_labels(&self, names: &[&str]) -> Result<()> {
        let body = json!({ "labels": names });
        self.entry()
            .child("labels")
            .send(Method::POST, Some(body), &[200])
            .await?;
        Ok(())
    }

    /// Detach one label
    pub async fn remove_label(&self, name: &str) -> Result<()> {
        self.entry()
            .child("labels")
            .child(name)
            .send(Method::DELETE, None, &[200])
            .await?;
        Ok(())
    }
}

impl Pull {
    /// Commits in the pull request, as raw records
    pub fn commits(&self) -> Pagination<JsonObject> {
        self.entry()
            .child("commits")
            .listing(&[], fields::into_object)
    }

    /// Changed files, as raw records
    pub fn files(&self) -> Pagination<JsonObject> {
        self.entry().child("files").listing(&[], fields::into_object)
    }

    /// Review comments on the diff
    pub fn comments(&self) -> PullComments {
        nested(self.entry(), "comments")
    }

    /// Merge the pull request, returning the merge result
    pub async fn merge(&self, message: &str) -> Result<JsonObject> {
        let body = json!({ "commit_message": message });
        self.entry()
            .child("merge")
            .send(Method::PUT, Some(body), &[200])
            .await?
            .json_object()
    }

    /// Check if the pull request has been merged
    pub async fn is_merged(&self) -> Result<bool> {
        self.entry().child("merge").check().await
    }
}

impl Release {
    pub fn assets(&self) -> ReleaseAssets {
        nested(self.entry(), "assets")
    }
}

impl Hook {
    /// Ask the server to deliver a ping event to the hook
    pub async fn ping(&self) -> Result<()> {
        self.entry()
            .child("pings")
            .send(Method::POST, None, &[204])
            .await?;
        Ok(())
    }
}

impl Gist {
    pub async fn star(&self) -> Result<()> {
        self.entry()
            .child("star")
            .send(Method::PUT, None, &[204])
            .await?;
        Ok(())
    }

    pub async fn unstar(&self) -> Result<()> {
        self.entry()
            .child("star")
            .send(Method::DELETE, None, &[204])
            .await?;
        Ok(())
    }

    pub async fn is_starred(&self) -> Result<bool> {
        self.entry().child("star").check().await
    }

    /// Fork the gist into the current user's account
    pub async fn fork(&self) -> Result<Gist> {
        let response = self
            .entry()
            .child("forks")
            .send(Method::POST, None, &[201])
            .await?;
        let id = <kind::Gist as super::Kind>::identity(&response.json_object()?)?;
        Ok(Gist::new(self.entry().parent().child(&id), id))
    }

    pub fn comments(&self) -> GistComments {
        Collection::under(self.entry())
    }
}

impl Gists {
    /// Create a gist from `(filename, content)` pairs
    pub async fn create_files(&self, files: &[(&str, &str)], public: bool) -> Result<Gist> {
        let files: JsonObject = files
            .iter()
            .map(|(name, content)| ((*name).to_string(), json!({ "content": content })))
            .collect();
        let mut body = JsonObject::new();
        body.insert("files".to_string(), JsonValue::Object(files));
        body.insert("public".to_string(), JsonValue::Bool(public));
        self.create(body).await
    }
}

impl Organization {
    pub fn repos(&self, params: &[(&str, &str)]) -> Pagination<Repo> {
        let entry = self.entry();
        repo_listing(&entry.parent().parent(), &entry.child("repos"), params)
    }

    pub fn members(&self, params: &[(&str, &str)]) -> Pagination<User> {
        let entry = self.entry();
        user_listing(&entry.parent().parent(), &entry.child("members"), params)
    }
}

impl User {
    pub fn repos(&self, params: &[(&str, &str)]) -> Pagination<Repo> {
        let entry = self.entry();
        repo_listing(&entry.parent().parent(), &entry.child("repos"), params)
    }

    /// Organizations the user publicly belongs to, addressed at `/orgs/{login}`
    pub fn organizations(&self) -> Collection<kind::Organization> {
        let entry = self.entry();
        Collection::with_items(entry.child("orgs"), entry.parent().parent().child("orgs"))
    }

    pub fn followers(&self, params: &[(&str, &str)]) -> Pagination<User> {
        let entry = self.entry();
        user_listing(&entry.parent().parent(), &entry.child("followers"), params)
    }
}
