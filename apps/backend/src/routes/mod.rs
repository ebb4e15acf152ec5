use actix_web::{web, HttpRequest, HttpResponse};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod auth;
pub mod carts;
pub mod health;
pub mod menu;
pub mod payments;
pub mod stats;
pub mod users;

/// Register every route. Gates are attached per resource: `JwtExtract` for
/// verified routes, `RequireAdmin` inside it for admin routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    auth::configure_routes(cfg);
    users::configure_routes(cfg);
    menu::configure_routes(cfg);
    carts::configure_routes(cfg);
    payments::configure_routes(cfg);
    stats::configure_routes(cfg);
    cfg.default_service(web::to(no_route));
}

async fn no_route(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(
        ErrorCode::NotFound,
        format!("No route for {} {}", req.method(), req.path()),
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InsertedResponse {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl From<ObjectId> for InsertedResponse {
    fn from(id: ObjectId) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id.to_hex(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeletedResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<u64> for DeletedResponse {
    fn from(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}
