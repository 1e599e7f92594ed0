//! Generic collection and item bindings

use super::entry::{Creatable, Entry, Listable, Patchable, Readable, Removable};
use crate::error::Result;
use crate::json::fields;
use crate::pagination::Pagination;
use crate::types::{JsonObject, JsonValue, Method};
use async_trait::async_trait;
use std::fmt;
use std::marker::PhantomData;

/// A value identifying an item, read from one field of its JSON
pub trait Identity: Clone + fmt::Display + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Read the identity from `field` of a record
    fn read(json: &JsonObject, field: &str) -> Result<Self>;
}

impl Identity for u64 {
    fn read(json: &JsonObject, field: &str) -> Result<Self> {
        fields::number(json, field)
    }
}

impl Identity for String {
    fn read(json: &JsonObject, field: &str) -> Result<Self> {
        fields::text(json, field).map(ToString::to_string)
    }
}

/// A kind of remote entity
pub trait Kind: Send + Sync + 'static {
    /// Path segment of the collection, e.g. `issues`
    const SEGMENT: &'static str;
    /// JSON field carrying an item's id, e.g. `number`
    const IDENTITY: &'static str;
    /// Type of the id
    type Id: Identity;

    /// Read an item's id from its JSON
    fn identity(json: &JsonObject) -> Result<Self::Id> {
        Self::Id::read(json, Self::IDENTITY)
    }
}

/// A kind whose items accept PATCH and DELETE
pub trait Mutable: Kind {}

/// A listing endpoint of one kind.
///
/// Items are usually addressed below the listing itself, but some APIs list
/// under one path and address items under another; `with_items` covers that.
pub struct Collection<K: Kind> {
    list: Entry,
    items: Entry,
    kind: PhantomData<fn() -> K>,
}

impl<K: Kind> Collection<K> {
    /// Collection listing at and addressing items under `list`
    pub fn new(list: Entry) -> Self {
        let items = list.clone();
        Self::with_items(list, items)
    }

    /// Collection at `parent/<K::SEGMENT>`
    pub fn under(parent: &Entry) -> Self {
        Self::new(parent.child(K::SEGMENT))
    }

    /// Collection listing at `list` whose items live under `items`
    pub fn with_items(list: Entry, items: Entry) -> Self {
        Self {
            list,
            items,
            kind: PhantomData,
        }
    }

    /// Where the collection is listed
    pub fn entry(&self) -> &Entry {
        &self.list
    }

    /// Handle on one item. Performs no I/O.
    pub fn get(&self, id: K::Id) -> Item<K> {
        Item::new(self.items.child(&id), id)
    }

    /// Lazily iterate the raw records instead of item handles
    pub fn records(&self, params: &[(&str, &str)]) -> Pagination<JsonObject> {
        self.list.listing(params, fields::into_object)
    }
}

impl<K: Mutable> Collection<K> {
    /// Delete one item
    pub async fn remove(&self, id: K::Id) -> Result<()> {
        self.get(id).remove().await
    }
}

impl<K: Kind> Listable for Collection<K> {
    type Item = Item<K>;

    fn iterate(&self, params: &[(&str, &str)]) -> Pagination<Item<K>> {
        let items = self.items.clone();
        self.list.listing(params, move |value| {
            let json = fields::into_object(value)?;
            let id = K::identity(&json)?;
            Ok(Item::new(items.child(&id), id))
        })
    }
}

#[async_trait]
impl<K: Kind> Creatable for Collection<K> {
    type Item = Item<K>;

    async fn create(&self, json: JsonObject) -> Result<Item<K>> {
        let response = self
            .list
            .send(Method::POST, Some(JsonValue::Object(json)), &[201])
            .await?;
        let id = K::identity(&response.json_object()?)?;
        Ok(self.get(id))
    }
}

impl<K: Kind> Clone for Collection<K> {
    fn clone(&self) -> Self {
        Self::with_items(self.list.clone(), self.items.clone())
    }
}

impl<K: Kind> fmt::Debug for Collection<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("list", &self.list)
            .field("items", &self.items)
            .finish()
    }
}

/// One entity of a kind
pub struct Item<K: Kind> {
    entry: Entry,
    id: K::Id,
    kind: PhantomData<fn() -> K>,
}

impl<K: Kind> Item<K> {
    /// Handle on the entity at `entry`
    pub fn new(entry: Entry, id: K::Id) -> Self {
        Self {
            entry,
            id,
            kind: PhantomData,
        }
    }

    /// The entity's id
    pub fn id(&self) -> &K::Id {
        &self.id
    }
}

impl<K: Kind> Readable for Item<K> {
    fn entry(&self) -> &Entry {
        &self.entry
    }
}

impl<K: Mutable> Patchable for Item<K> {}

impl<K: Mutable> Removable for Item<K> {}

impl<K: Kind> Clone for Item<K> {
    fn clone(&self) -> Self {
        Self::new(self.entry.clone(), self.id.clone())
    }
}

impl<K: Kind> PartialEq for Item<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.entry.request().url == other.entry.request().url
    }
}

impl<K: Kind> fmt::Debug for Item<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id)
            .field("entry", &self.entry)
            .finish()
    }
}
