use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::gate::{check_ownership, Ownership};
use crate::error::AppError;
use crate::extractors::{Identity, JsonDocument, OwnerEmail, ValidatedJson};
use crate::middleware::JwtExtract;
use crate::repos::payments;
use crate::services::checkout;
use crate::state::app_state::{require_payments, AppState};
use crate::store::json::documents_to_json;

#[derive(Debug, Deserialize)]
struct IntentRequest {
    price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IntentResponse {
    client_secret: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentResponse {
    inserted_id: String,
    deleted_count: u64,
}

async fn create_payment_intent(
    body: ValidatedJson<IntentRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let gateway = require_payments(&app_state)?;
    let intent = checkout::create_intent(gateway, body.price).await?;
    Ok(HttpResponse::Ok().json(IntentResponse {
        client_secret: intent.client_secret,
    }))
}

async fn record_payment(
    identity: Identity,
    body: JsonDocument,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let recorded =
        checkout::record_payment(app_state.store(), &identity.0, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PaymentResponse {
        inserted_id: recorded.inserted_id.to_hex(),
        deleted_count: recorded.deleted_count,
    }))
}

async fn payment_history(
    identity: Identity,
    owner: OwnerEmail,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = match check_ownership(&identity.0, owner.as_deref())? {
        Ownership::Empty => return Ok(HttpResponse::Ok().json(json!([]))),
        Ownership::Owner(email) => email,
    };

    let history = payments::list_for_owner(app_state.store(), email).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(history)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/create-payment-intent")
            .wrap(JwtExtract)
            .route(web::post().to(create_payment_intent)),
    )
    .service(
        web::resource("/payments")
            .wrap(JwtExtract)
            .route(web::get().to(payment_history))
            .route(web::post().to(record_payment)),
    );
}
