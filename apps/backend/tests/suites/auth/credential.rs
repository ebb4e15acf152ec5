use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend_test_support::error_body::assert_error_response;
use bistro_backend::error::AppError;
use bistro_backend::extractors::Identity;
use bistro_backend::middleware::jwt_extract::JwtExtract;
use bistro_backend::state::security_config::SecurityConfig;

use crate::common::read_ok_json;
use crate::support::app_builder::create_test_app;
use crate::support::auth::{bearer_header, mint_expired_token, mint_test_token};
use crate::support::test_context;

async fn whoami(
    identity: Identity,
    calls: web::Data<AtomicUsize>,
) -> Result<HttpResponse, AppError> {
    calls.fetch_add(1, Ordering::SeqCst);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "email": identity.email() })))
}

macro_rules! gated_app {
    ($state:expr, $calls:expr) => {{
        let calls = $calls.clone();
        create_test_app($state)
            .with_routes(move |cfg| {
                cfg.app_data(web::Data::from(calls.clone())).service(
                    web::scope("/test-auth")
                        .wrap(JwtExtract)
                        .route("/me", web::get().to(whoami)),
                );
            })
            .build()
            .await
    }};
}

#[actix_web::test]
async fn missing_header_is_401_and_handler_never_runs() {
    let ctx = test_context().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let app = gated_app!(ctx.state, calls);

    let req = test::TestRequest::get().uri("/test-auth/me").to_request();
    let resp = test::call_service(&app, req).await;

    let body =
        assert_error_response(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;
    assert_eq!(body.message, "unauthorized access");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn scheme_without_token_is_401() {
    let ctx = test_context().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let app = gated_app!(ctx.state, calls);

    for value in ["Bearer", "Bearer ", "Bearer  token-after-double-space"] {
        let req = test::TestRequest::get()
            .uri("/test-auth/me")
            .insert_header(("Authorization", value))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_response(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER")
            .await;
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn scheme_word_is_not_interpreted() {
    let ctx = test_context().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let token = mint_test_token("a@x.com", ctx.security());
    let app = gated_app!(ctx.state, calls);

    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(("Authorization", format!("Token {token}")))
        .to_request();
    let json = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(json["email"], "a@x.com");
}

#[actix_web::test]
async fn garbage_token_is_403() {
    let ctx = test_context().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let app = gated_app!(ctx.state, calls);

    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "UNAUTHORIZED_INVALID_JWT").await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn token_signed_with_another_secret_is_403() {
    let ctx = test_context().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let app = gated_app!(ctx.state, calls);

    let foreign = SecurityConfig::new("a-completely-different-secret".as_bytes());
    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(("Authorization", bearer_header("a@x.com", &foreign)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "UNAUTHORIZED_INVALID_JWT").await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn expired_token_is_403() {
    let ctx = test_context().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let token = mint_expired_token("a@x.com", ctx.security());
    let app = gated_app!(ctx.state, calls);

    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body =
        assert_error_response(resp, StatusCode::FORBIDDEN, "UNAUTHORIZED_EXPIRED_JWT").await;
    assert!(body.message.contains("expired"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn valid_token_reaches_handler_with_signed_email() {
    let ctx = test_context().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let header = bearer_header("a@x.com", ctx.security());
    let app = gated_app!(ctx.state, calls);

    let req = test::TestRequest::get()
        .uri("/test-auth/me")
        .insert_header(("Authorization", header))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().contains_key("x-request-id"));

    let json = read_ok_json(resp).await;
    assert_eq!(json["email"], "a@x.com");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
