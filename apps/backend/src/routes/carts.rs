use actix_web::{guard, web, HttpResponse};
use serde_json::json;

use super::{DeletedResponse, InsertedResponse};
use crate::auth::gate::{check_ownership, Ownership};
use crate::error::AppError;
use crate::extractors::{Identity, JsonDocument, OwnerEmail, PathObjectId};
use crate::middleware::JwtExtract;
use crate::repos::carts;
use crate::state::app_state::AppState;
use crate::store::json::documents_to_json;

async fn list_cart(
    identity: Identity,
    owner: OwnerEmail,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = match check_ownership(&identity.0, owner.as_deref())? {
        Ownership::Empty => return Ok(HttpResponse::Ok().json(json!([]))),
        Ownership::Owner(email) => email,
    };

    let items = carts::list_for_owner(app_state.store(), email).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(items)))
}

async fn add_to_cart(
    body: JsonDocument,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = carts::insert(app_state.store(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(InsertedResponse::from(id)))
}

async fn remove_from_cart(
    id: PathObjectId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deleted = carts::delete(app_state.store(), id.0).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse::from(deleted)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/carts")
            .guard(guard::Get())
            .wrap(JwtExtract)
            .route(web::get().to(list_cart)),
    )
    .service(web::resource("/carts").route(web::post().to(add_to_cart)))
    .service(web::resource("/carts/{id}").route(web::delete().to(remove_from_cart)));
}
