use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use parking_lot::RwLock;

use super::filter::{apply_set, is_operator_document, matches};
use super::{Collection, DocumentStore, StoreError, UpdateSummary};

/// In-process document store with the same observable semantics as the
/// MongoDB backend for the filters the service uses. Insertion order is
/// preserved per collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every document in every collection.
    pub fn clear(&self) {
        self.collections.write().clear();
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read();
        let Some(docs) = guard.get(&collection) else {
            return Ok(None);
        };
        for doc in docs {
            if matches(doc, &filter)? {
                return Ok(Some(doc.clone()));
            }
        }
        Ok(None)
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read();
        let Some(docs) = guard.get(&collection) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        for doc in docs {
            if matches(doc, &filter)? {
                out.push(doc.clone());
            }
        }
        Ok(out)
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<ObjectId, StoreError> {
        let id = assign_id(&mut document)?;

        let mut guard = self.collections.write();
        let docs = guard.entry(collection).or_default();
        push_unique(docs, id, document)?;
        Ok(id)
    }

    async fn insert_if_absent(
        &self,
        collection: Collection,
        filter: Document,
        mut document: Document,
    ) -> Result<Option<ObjectId>, StoreError> {
        for (key, value) in &filter {
            if !matches!(value, Bson::Document(ops) if is_operator_document(ops)) {
                document.insert(key.clone(), value.clone());
            }
        }
        let id = assign_id(&mut document)?;

        // Lookup and insert share one write guard.
        let mut guard = self.collections.write();
        let docs = guard.entry(collection).or_default();
        for doc in docs.iter() {
            if matches(doc, &filter)? {
                return Ok(None);
            }
        }
        push_unique(docs, id, document)?;
        Ok(Some(id))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        set: Document,
    ) -> Result<UpdateSummary, StoreError> {
        let mut guard = self.collections.write();
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(UpdateSummary {
                matched_count: 0,
                modified_count: 0,
            });
        };
        for doc in docs.iter_mut() {
            if matches(doc, &filter)? {
                let modified = apply_set(doc, &set);
                return Ok(UpdateSummary {
                    matched_count: 1,
                    modified_count: u64::from(modified),
                });
            }
        }
        Ok(UpdateSummary {
            matched_count: 0,
            modified_count: 0,
        })
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<u64, StoreError> {
        let mut guard = self.collections.write();
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(0);
        };
        let mut position = None;
        for (i, doc) in docs.iter().enumerate() {
            if matches(doc, &filter)? {
                position = Some(i);
                break;
            }
        }
        Ok(match position {
            Some(i) => {
                docs.remove(i);
                1
            }
            None => 0,
        })
    }

    async fn delete_many(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<u64, StoreError> {
        let mut guard = self.collections.write();
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(0);
        };
        // Evaluate first so a bad filter leaves the collection untouched.
        let mut keep = Vec::with_capacity(docs.len());
        for doc in docs.iter() {
            keep.push(!matches(doc, &filter)?);
        }
        let before = docs.len();
        let mut flags = keep.into_iter();
        docs.retain(|_| flags.next().unwrap_or(true));
        Ok((before - docs.len()) as u64)
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        Ok(self
            .collections
            .read()
            .get(&collection)
            .map_or(0, |docs| docs.len() as u64))
    }
}

fn assign_id(document: &mut Document) -> Result<ObjectId, StoreError> {
    match document.get("_id") {
        Some(Bson::ObjectId(id)) => Ok(*id),
        Some(other) => Err(StoreError::Malformed(format!(
            "_id must be an ObjectId, got {:?}",
            other.element_type()
        ))),
        None => {
            let id = ObjectId::new();
            document.insert("_id", id);
            Ok(id)
        }
    }
}

fn push_unique(docs: &mut Vec<Document>, id: ObjectId, document: Document) -> Result<(), StoreError> {
    if docs
        .iter()
        .any(|d| d.get_object_id("_id").is_ok_and(|existing| existing == id))
    {
        return Err(StoreError::Query(format!("duplicate key _id {id}")));
    }
    docs.push(document);
    Ok(())
}
