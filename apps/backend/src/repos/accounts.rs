//! Account records in the `users` collection, keyed by email.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use serde::Serialize;

use crate::store::{Collection, DocumentStore, StoreError, UpdateSummary};

/// Role stored on an account record. Anything other than `"admin"`,
/// including a missing field, is the default role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub const ADMIN: &'static str = "admin";

    pub fn from_field(value: Option<&str>) -> Self {
        match value {
            Some(Self::ADMIN) => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub id: ObjectId,
    pub email: String,
    pub role: Role,
}

impl AccountRecord {
    pub fn from_document(document: &Document) -> Result<Self, StoreError> {
        let id = document
            .get_object_id("_id")
            .map_err(|e| StoreError::Malformed(format!("account _id: {e}")))?;
        let email = document
            .get_str("email")
            .map_err(|e| StoreError::Malformed(format!("account email: {e}")))?
            .to_string();
        let role = Role::from_field(document.get_str("role").ok());
        Ok(Self { id, email, role })
    }
}

pub async fn find_by_email(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Option<AccountRecord>, StoreError> {
    store
        .find_one(Collection::Users, doc! { "email": email })
        .await?
        .map(|document| AccountRecord::from_document(&document))
        .transpose()
}

/// Insert an account document as-is, without a uniqueness check.
pub async fn insert(store: &dyn DocumentStore, document: Document) -> Result<ObjectId, StoreError> {
    store.insert_one(Collection::Users, document).await
}

/// Create the account for `email` unless one exists. `None` means an
/// account was already there and nothing was written.
pub async fn insert_if_absent(
    store: &dyn DocumentStore,
    email: &str,
    profile: Document,
) -> Result<Option<ObjectId>, StoreError> {
    store
        .insert_if_absent(Collection::Users, doc! { "email": email }, profile)
        .await
}

/// Set `role: "admin"` on the account with `id`.
pub async fn promote(store: &dyn DocumentStore, id: ObjectId) -> Result<UpdateSummary, StoreError> {
    store
        .update_one(
            Collection::Users,
            doc! { "_id": id },
            doc! { "role": Role::ADMIN },
        )
        .await
}

pub async fn count(store: &dyn DocumentStore) -> Result<u64, StoreError> {
    store.count(Collection::Users).await
}

/// Raw account documents, profile fields included.
pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Document>, StoreError> {
    store.find_many(Collection::Users, doc! {}).await
}
