use actix_web::{guard, web, HttpResponse};
use serde::Serialize;
use serde_json::json;

use super::InsertedResponse;
use crate::error::AppError;
use crate::extractors::{Identity, JsonDocument, PathObjectId};
use crate::middleware::{JwtExtract, RequireAdmin};
use crate::repos::accounts;
use crate::services::users::{self, Registration};
use crate::state::app_state::AppState;
use crate::store::json::documents_to_json;

#[derive(Debug, Serialize)]
struct AdminCheck {
    admin: bool,
}

async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let documents = accounts::list(app_state.store()).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(documents)))
}

async fn register(
    body: JsonDocument,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    match users::register(app_state.store(), body.into_inner()).await? {
        Registration::Created(id) => Ok(HttpResponse::Ok().json(InsertedResponse::from(id))),
        Registration::AlreadyExists => Ok(HttpResponse::Ok().json(json!({
            "message": "user already exists",
            "insertedId": null,
        }))),
    }
}

async fn admin_check(
    identity: Identity,
    email: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let admin = users::is_admin(app_state.store(), &identity.0, &email).await?;
    Ok(HttpResponse::Ok().json(AdminCheck { admin }))
}

async fn promote(
    id: PathObjectId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let summary = accounts::promote(app_state.store(), id.0).await?;
    Ok(HttpResponse::Ok().json(summary))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .guard(guard::Get())
            .wrap(RequireAdmin)
            .wrap(JwtExtract)
            .route(web::get().to(list_users)),
    )
    .service(web::resource("/users").route(web::post().to(register)))
    .service(
        web::resource("/users/admin/{email}")
            .guard(guard::Get())
            .wrap(JwtExtract)
            .route(web::get().to(admin_check)),
    )
    .service(
        web::resource("/users/admin/{id}")
            .guard(guard::Patch())
            .wrap(RequireAdmin)
            .wrap(JwtExtract)
            .route(web::patch().to(promote)),
    );
}
