//! Resource kinds
//!
//! Each kind names the path segment its collection lives at and the JSON
//! field that identifies one of its items. Kinds marked `mut` also
//! implement [`Mutable`], so their items can be patched and removed.

use super::collection::{Kind, Mutable};

macro_rules! kind {
    ($(#[$meta:meta])* mut $name:ident, $segment:literal, $identity:literal, $id:ty) => {
        kind!($(#[$meta])* $name, $segment, $identity, $id);

        impl Mutable for $name {}
    };
    ($(#[$meta:meta])* $name:ident, $segment:literal, $identity:literal, $id:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Kind for $name {
            const SEGMENT: &'static str = $segment;
            const IDENTITY: &'static str = $identity;
            type Id = $id;
        }
    };
}

kind!(
    /// Repository issues, by number
    mut Issue, "issues", "number", u64
);
kind!(
    /// Comments on issues and pull requests' conversation
    mut IssueComment, "comments", "id", u64
);
kind!(
    /// Issue timeline events, read-only
    IssueEvent, "events", "id", u64
);
kind!(
    /// Repository labels, by name
    mut Label, "labels", "name", String
);
kind!(mut Milestone, "milestones", "number", u64);
kind!(
    /// Pull requests, by number
    mut Pull, "pulls", "number", u64
);
kind!(
    /// Review comments on pull request diffs
    mut PullComment, "comments", "id", u64
);
kind!(mut Release, "releases", "id", u64);
kind!(mut ReleaseAsset, "assets", "id", u64);
kind!(
    /// Repository webhooks
    mut Hook, "hooks", "id", u64
);
kind!(
    /// Commits, by SHA, read-only
    Commit, "commits", "sha", String
);
kind!(mut DeployKey, "keys", "id", u64);
kind!(
    /// Gists, by their opaque string id
    mut Gist, "gists", "id", String
);
kind!(mut GistComment, "comments", "id", u64);
kind!(
    /// Organizations, by login
    mut Organization, "orgs", "login", String
);
kind!(
    /// Users, by login. Read-only through `/users`
    User, "users", "login", String
);
