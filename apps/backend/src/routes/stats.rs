use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::middleware::{JwtExtract, RequireAdmin};
use crate::services::stats::admin_stats;
use crate::state::app_state::AppState;

async fn stats(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(admin_stats(app_state.store()).await?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/admin-stats")
            .wrap(RequireAdmin)
            .wrap(JwtExtract)
            .route(web::get().to(stats)),
    );
}
