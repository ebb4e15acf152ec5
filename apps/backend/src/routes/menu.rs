use actix_web::{guard, web, HttpResponse};

use super::{DeletedResponse, InsertedResponse};
use crate::error::AppError;
use crate::extractors::{JsonDocument, PathObjectId};
use crate::middleware::{JwtExtract, RequireAdmin};
use crate::repos::menu;
use crate::state::app_state::AppState;
use crate::store::json::documents_to_json;

async fn list_menu(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items = menu::list(app_state.store()).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(items)))
}

async fn add_item(
    body: JsonDocument,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = menu::insert(app_state.store(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(InsertedResponse::from(id)))
}

async fn delete_item(
    id: PathObjectId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deleted = menu::delete(app_state.store(), id.0).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse::from(deleted)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/menu")
            .guard(guard::Get())
            .route(web::get().to(list_menu)),
    )
    .service(
        web::resource("/menu")
            .guard(guard::Post())
            .wrap(RequireAdmin)
            .wrap(JwtExtract)
            .route(web::post().to(add_item)),
    )
    .service(
        web::resource("/menu/{id}")
            .wrap(RequireAdmin)
            .wrap(JwtExtract)
            .route(web::delete().to(delete_item)),
    );
}
