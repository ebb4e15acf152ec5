use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use backend_test_support::unique_helpers::unique_email;
use bistro_backend::repos::accounts;
use bistro_backend::store::{Collection, DocumentStore};
use mongodb::bson::doc;
use serde_json::json;

use crate::common::read_ok_json;
use crate::support::app_builder::create_test_app;
use crate::support::auth::bearer_header;
use crate::support::test_context;

#[actix_web::test]
async fn registration_is_idempotent() {
    let ctx = test_context().await;
    let store = ctx.store.clone();
    let app = create_test_app(ctx.state).with_prod_routes().build().await;
    let email = unique_email("diner");

    let register = || {
        test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "email": email, "name": "Diner" }))
            .to_request()
    };

    let first = read_ok_json(test::call_service(&app, register()).await).await;
    assert!(first["insertedId"].is_string());

    let second = read_ok_json(test::call_service(&app, register()).await).await;
    assert_eq!(second["message"], "user already exists");
    assert!(second["insertedId"].is_null());

    assert_eq!(store.count(Collection::Users).await.unwrap(), 1);
}

#[actix_web::test]
async fn admin_check_answers_only_for_the_caller() {
    let ctx = test_context().await;
    ctx.store
        .insert_one(
            Collection::Users,
            doc! { "email": "boss@x.com", "role": "admin" },
        )
        .await
        .unwrap();
    let boss = bearer_header("boss@x.com", ctx.security());
    let diner = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let ask = |header: &str, email: &str| {
        test::TestRequest::get()
            .uri(&format!("/users/admin/{email}"))
            .insert_header(("Authorization", header.to_string()))
            .to_request()
    };

    let json = read_ok_json(test::call_service(&app, ask(&boss, "boss@x.com")).await).await;
    assert_eq!(json, json!({ "admin": true }));

    let json = read_ok_json(test::call_service(&app, ask(&diner, "boss@x.com")).await).await;
    assert_eq!(json, json!({ "admin": false }));

    let json = read_ok_json(test::call_service(&app, ask(&diner, "a@x.com")).await).await;
    assert_eq!(json, json!({ "admin": false }));
}

#[actix_web::test]
async fn admin_lists_and_promotes_accounts() {
    let ctx = test_context().await;
    accounts::insert(&*ctx.store, doc! { "email": "boss@x.com", "role": "admin" })
        .await
        .unwrap();
    let diner_id = accounts::insert(&*ctx.store, doc! { "email": "a@x.com" })
        .await
        .unwrap();
    let store = ctx.store.clone();
    let boss = bearer_header("boss@x.com", ctx.security());
    let diner = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    // Default role cannot promote
    let req = test::TestRequest::patch()
        .uri(&format!("/users/admin/{}", diner_id.to_hex()))
        .insert_header(("Authorization", diner.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE").await;

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(("Authorization", boss.clone()))
        .to_request();
    let json = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let req = test::TestRequest::patch()
        .uri(&format!("/users/admin/{}", diner_id.to_hex()))
        .insert_header(("Authorization", boss))
        .to_request();
    let json = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(json, json!({ "matchedCount": 1, "modifiedCount": 1 }));

    let promoted = accounts::find_by_email(&*store, "a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert!(promoted.role.is_admin());
}
