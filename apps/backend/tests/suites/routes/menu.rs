use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use backend_test_support::unique_helpers::unique_str;
use bistro_backend::repos::accounts;
use mongodb::bson::doc;
use serde_json::json;

use crate::common::read_ok_json;
use crate::support::app_builder::create_test_app;
use crate::support::auth::bearer_header;
use crate::support::test_context;

#[actix_web::test]
async fn menu_is_public_but_edits_need_admin() {
    let ctx = test_context().await;
    accounts::insert(&*ctx.store, doc! { "email": "chef@x.com", "role": "admin" })
        .await
        .unwrap();
    let chef = bearer_header("chef@x.com", ctx.security());
    let diner = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;
    let dish = unique_str("dish");

    let req = test::TestRequest::post()
        .uri("/menu")
        .insert_header(("Authorization", diner))
        .set_json(json!({ "name": dish, "price": 9.5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE").await;

    let req = test::TestRequest::post()
        .uri("/menu")
        .insert_header(("Authorization", chef.clone()))
        .set_json(json!({ "name": dish, "price": 9.5 }))
        .to_request();
    let inserted = read_ok_json(test::call_service(&app, req).await).await;
    let id = inserted["insertedId"].as_str().unwrap().to_string();

    let req = test::TestRequest::get().uri("/menu").to_request();
    let menu = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(menu.as_array().unwrap().len(), 1);
    assert_eq!(menu[0]["name"], dish.as_str());
    assert_eq!(menu[0]["_id"], id.as_str());

    let req = test::TestRequest::delete()
        .uri(&format!("/menu/{id}"))
        .insert_header(("Authorization", chef))
        .to_request();
    let deleted = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(deleted["deletedCount"], 1);
}
