use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};

use crate::store::{Collection, DocumentStore, StoreError};

pub async fn list_for_owner(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Vec<Document>, StoreError> {
    store
        .find_many(Collection::Payments, doc! { "email": email })
        .await
}

pub async fn insert(store: &dyn DocumentStore, payment: Document) -> Result<ObjectId, StoreError> {
    store.insert_one(Collection::Payments, payment).await
}

pub async fn count(store: &dyn DocumentStore) -> Result<u64, StoreError> {
    store.count(Collection::Payments).await
}

/// Sum of the `price` field over every payment, in display units.
/// Non-numeric or missing prices count as zero.
pub async fn total_revenue(store: &dyn DocumentStore) -> Result<f64, StoreError> {
    let payments = store.find_many(Collection::Payments, doc! {}).await?;
    Ok(payments
        .iter()
        .map(|payment| match payment.get("price") {
            Some(Bson::Double(v)) => *v,
            Some(Bson::Int32(v)) => f64::from(*v),
            Some(Bson::Int64(v)) => *v as f64,
            _ => 0.0,
        })
        .sum())
}
