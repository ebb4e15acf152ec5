//! Cart items. Each item carries its owner's `email`.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};

use crate::store::{Collection, DocumentStore, StoreError};

pub async fn list_for_owner(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Vec<Document>, StoreError> {
    store
        .find_many(Collection::Carts, doc! { "email": email })
        .await
}

pub async fn insert(store: &dyn DocumentStore, item: Document) -> Result<ObjectId, StoreError> {
    store.insert_one(Collection::Carts, item).await
}

pub async fn delete(store: &dyn DocumentStore, id: ObjectId) -> Result<u64, StoreError> {
    store.delete_one(Collection::Carts, doc! { "_id": id }).await
}

/// Delete every cart item whose id is in `ids`.
pub async fn delete_many(store: &dyn DocumentStore, ids: &[ObjectId]) -> Result<u64, StoreError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let ids: Vec<Bson> = ids.iter().copied().map(Bson::ObjectId).collect();
    store
        .delete_many(Collection::Carts, doc! { "_id": { "$in": ids } })
        .await
}
