use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use bistro_backend::infra::state::build_state;
use bistro_backend::payments::FakeGateway;
use bistro_backend::repos::carts;
use bistro_backend::state::security_config::SecurityConfig;
use bistro_backend::store::{Collection, DocumentStore};
use mongodb::bson::doc;
use serde_json::json;

use crate::common::read_ok_json;
use crate::support::app_builder::create_test_app;
use crate::support::auth::bearer_header;
use crate::support::state::{test_context_with_gateway, TEST_SECRET};
use crate::support::test_context;

#[actix_web::test]
async fn intent_is_created_in_cents() {
    let ctx = test_context().await;
    let gateway = ctx.gateway.clone();
    let header = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .insert_header(("Authorization", header))
        .set_json(json!({ "price": 23.45 }))
        .to_request();
    let json = read_ok_json(test::call_service(&app, req).await).await;
    assert!(json["clientSecret"].as_str().unwrap().contains("_secret_"));
    assert_eq!(gateway.created(), vec![(2345, "usd".to_string())]);
}

#[actix_web::test]
async fn intent_needs_a_credential_and_a_valid_price() {
    let ctx = test_context().await;
    let header = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .set_json(json!({ "price": 10 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .insert_header(("Authorization", header.clone()))
        .set_json(json!({ "price": -3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "INVALID_PRICE").await;

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .insert_header(("Authorization", header))
        .set_json(json!({ "amount": 3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[actix_web::test]
async fn gateway_rejection_is_502() {
    let ctx = test_context_with_gateway(FakeGateway::rejecting("card_declined")).await;
    let header = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .insert_header(("Authorization", header))
        .set_json(json!({ "price": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = assert_error_response(resp, StatusCode::BAD_GATEWAY, "PAYMENT_GATEWAY_ERROR").await;
    assert!(!body.message.contains("card_declined"));
}

#[actix_web::test]
async fn missing_gateway_is_a_config_error() {
    let security = SecurityConfig::new(TEST_SECRET);
    let header = bearer_header("a@x.com", &security);
    let state = build_state().with_security(security).build().await.unwrap();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .insert_header(("Authorization", header))
        .set_json(json!({ "price": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR").await;
}

#[actix_web::test]
async fn recording_a_payment_clears_the_cart_and_pins_the_email() {
    let ctx = test_context().await;
    let first = carts::insert(&*ctx.store, doc! { "email": "a@x.com", "name": "Soup" })
        .await
        .unwrap();
    let second = carts::insert(&*ctx.store, doc! { "email": "a@x.com", "name": "Pie" })
        .await
        .unwrap();
    let store = ctx.store.clone();
    let header = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/payments")
        .insert_header(("Authorization", header.clone()))
        .set_json(json!({
            "email": "spoofed@x.com",
            "price": 17.5,
            "transactionId": "pi_123",
            "cartItems": [first.to_hex(), second.to_hex()],
        }))
        .to_request();
    let json = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(json["deletedCount"], 2);
    assert!(json["insertedId"].is_string());

    assert_eq!(store.count(Collection::Carts).await.unwrap(), 0);

    let req = test::TestRequest::get()
        .uri("/payments?email=a@x.com")
        .insert_header(("Authorization", header))
        .to_request();
    let history = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["email"], "a@x.com");
    assert_eq!(history[0]["transactionId"], "pi_123");
}
