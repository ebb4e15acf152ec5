use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::IdentityClaims;
use crate::error::AppError;

/// Verified identity of the caller.
///
/// Reads the claims `JwtExtract` stored in request extensions. On a route
/// without that middleware the extraction fails as an unauthenticated
/// request rather than falling back to anything client-supplied.
#[derive(Debug, Clone)]
pub struct Identity(pub IdentityClaims);

impl Identity {
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<IdentityClaims>()
                .cloned()
                .map(Identity)
                .ok_or_else(AppError::unauthorized_missing_bearer),
        )
    }
}
