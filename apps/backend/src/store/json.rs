//! Conversions between stored documents and the JSON the API speaks.
//!
//! Outbound, ids are flattened to hex strings and datetimes to RFC 3339 so
//! clients never see extended-JSON wrappers like `{"$oid": ...}`.

use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

use super::StoreError;

pub fn document_to_json(document: Document) -> Value {
    let mut map = Map::with_capacity(document.len());
    for (key, value) in document {
        map.insert(key, bson_to_json(value));
    }
    Value::Object(map)
}

pub fn documents_to_json(documents: Vec<Document>) -> Value {
    Value::Array(documents.into_iter().map(document_to_json).collect())
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Convert a JSON object received from a client into a document.
/// A client-supplied `_id` is dropped; the store assigns ids.
pub fn json_to_document(object: Map<String, Value>) -> Result<Document, StoreError> {
    let mut document = mongodb::bson::to_document(&object)
        .map_err(|e| StoreError::Malformed(e.to_string()))?;
    document.remove("_id");
    Ok(document)
}
