//! Document store abstraction.
//!
//! Handlers and repositories talk to `dyn DocumentStore`; production wires a
//! `MongoStore`, tests and local development a `MemoryStore`. Filters are
//! limited to top-level field equality and `{ field: { "$in": [..] } }`,
//! which is everything the service issues.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use serde::Serialize;
use thiserror::Error;

mod filter;
pub mod json;
pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Logical collections of the service database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Menu,
    Carts,
    Payments,
}

impl Collection {
    pub const fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Menu => "menu",
            Collection::Carts => "carts",
            Collection::Payments => "payments",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("unsupported filter: {0}")]
    UnsupportedFilter(String),
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Outcome of an update-one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[async_trait]
pub trait DocumentStore: Debug + Send + Sync {
    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    async fn find_many(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError>;

    /// Insert a document and return its `_id`. A document without `_id`
    /// gets a fresh `ObjectId`.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<ObjectId, StoreError>;

    /// Insert `document` unless a document matching `filter` already exists,
    /// as a single atomic step. Returns the new `_id`, or `None` when a match
    /// was found and nothing was written. Equality fields of `filter` are
    /// copied into the inserted document.
    async fn insert_if_absent(
        &self,
        collection: Collection,
        filter: Document,
        document: Document,
    ) -> Result<Option<ObjectId>, StoreError>;

    /// Apply `set` with `$set` semantics to the first document matching `filter`.
    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        set: Document,
    ) -> Result<UpdateSummary, StoreError>;

    async fn delete_one(&self, collection: Collection, filter: Document)
        -> Result<u64, StoreError>;

    async fn delete_many(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<u64, StoreError>;

    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;
}

pub type SharedStore = Arc<dyn DocumentStore>;
