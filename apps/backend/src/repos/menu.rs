use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};

use crate::store::{Collection, DocumentStore, StoreError};

pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Document>, StoreError> {
    store.find_many(Collection::Menu, doc! {}).await
}

pub async fn insert(store: &dyn DocumentStore, item: Document) -> Result<ObjectId, StoreError> {
    store.insert_one(Collection::Menu, item).await
}

pub async fn delete(store: &dyn DocumentStore, id: ObjectId) -> Result<u64, StoreError> {
    store.delete_one(Collection::Menu, doc! { "_id": id }).await
}

pub async fn count(store: &dyn DocumentStore) -> Result<u64, StoreError> {
    store.count(Collection::Menu).await
}
