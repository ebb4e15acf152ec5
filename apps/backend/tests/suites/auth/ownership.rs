use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use backend_test_support::unique_helpers::unique_email;
use bistro_backend::repos::carts;
use mongodb::bson::doc;

use crate::common::read_ok_json;
use crate::support::app_builder::create_test_app;
use crate::support::auth::bearer_header;
use crate::support::test_context;

#[actix_web::test]
async fn owner_sees_only_their_cart() {
    let ctx = test_context().await;
    let owner = unique_email("owner");
    let other = unique_email("other");
    carts::insert(&*ctx.store, doc! { "email": owner.as_str(), "name": "Soup" })
        .await
        .unwrap();
    carts::insert(&*ctx.store, doc! { "email": other.as_str(), "name": "Pie" })
        .await
        .unwrap();

    let header = bearer_header(&owner, ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/carts?email={owner}"))
        .insert_header(("Authorization", header))
        .to_request();
    let json = read_ok_json(test::call_service(&app, req).await).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Soup");
    assert!(items[0]["_id"].is_string());
}

#[actix_web::test]
async fn asking_for_someone_else_is_403() {
    let ctx = test_context().await;
    let header = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    for uri in ["/carts?email=b@x.com", "/payments?email=b@x.com"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", header.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body = assert_error_response(resp, StatusCode::FORBIDDEN, "FORBIDDEN").await;
        assert_eq!(body.message, "forbidden access");
    }
}

#[actix_web::test]
async fn absent_email_is_an_empty_list() {
    let ctx = test_context().await;
    carts::insert(&*ctx.store, doc! { "email": "a@x.com" })
        .await
        .unwrap();
    let header = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    for uri in ["/carts", "/carts?email=", "/payments"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", header.clone()))
            .to_request();
        let json = read_ok_json(test::call_service(&app, req).await).await;
        assert_eq!(json, serde_json::json!([]), "uri {uri}");
    }
}
