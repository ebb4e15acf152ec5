//! Repository layer: one module per collection, free functions over
//! `&dyn DocumentStore`.

pub mod accounts;
pub mod carts;
pub mod menu;
pub mod payments;

use mongodb::bson::oid::ObjectId;

use crate::errors::ErrorCode;
use crate::AppError;

/// Parse a 24-hex-digit object id supplied by a client.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidObjectId,
            format!("'{raw}' is not a valid object id"),
        )
    })
}
