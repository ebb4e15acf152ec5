use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use mongodb::bson::Document;
use serde_json::Value;

use super::validated_json::{parse_json, read_body};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::store::json::json_to_document;

/// A free-form JSON object body, converted to a store document.
/// Any client-supplied `_id` is dropped.
#[derive(Debug)]
pub struct JsonDocument(pub Document);

impl JsonDocument {
    pub fn into_inner(self) -> Document {
        self.0
    }
}

impl FromRequest for JsonDocument {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let payload = payload.take();

        Box::pin(async move {
            let body = read_body(payload).await?;
            document_from_value(parse_json::<Value>(&body)?).map(JsonDocument)
        })
    }
}

fn document_from_value(value: Value) -> Result<Document, AppError> {
    match value {
        Value::Object(object) => json_to_document(object).map_err(|e| {
            AppError::bad_request(ErrorCode::BadRequest, format!("Unusable document: {e}"))
        }),
        _ => Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "Request body must be a JSON object",
        )),
    }
}
