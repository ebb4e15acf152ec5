use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::Deserialize;

use crate::error::AppError;
use crate::errors::ErrorCode;

#[derive(Debug, Deserialize)]
struct OwnerParams {
    email: Option<String>,
}

/// The `?email=` query parameter naming whose records are requested.
/// Absent and empty are both `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerEmail(pub Option<String>);

impl OwnerEmail {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for OwnerEmail {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = web::Query::<OwnerParams>::from_query(req.query_string())
            .map(|params| OwnerEmail(params.into_inner().email.filter(|e| !e.is_empty())))
            .map_err(|e| AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query: {e}")));
        ready(result)
    }
}
