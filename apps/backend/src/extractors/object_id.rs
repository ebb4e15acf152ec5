use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use mongodb::bson::oid::ObjectId;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::parse_object_id;

/// The `{id}` path segment, parsed as an object id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathObjectId(pub ObjectId);

impl FromRequest for PathObjectId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("id")
            .ok_or_else(|| AppError::bad_request(ErrorCode::InvalidObjectId, "Missing id parameter"))
            .and_then(parse_object_id)
            .map(PathObjectId);
        ready(result)
    }
}
