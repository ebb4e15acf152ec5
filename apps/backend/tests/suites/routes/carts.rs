use actix_web::test;
use backend_test_support::unique_helpers::{unique_email, unique_str};
use serde_json::json;

use crate::common::read_ok_json;
use crate::support::app_builder::create_test_app;
use crate::support::auth::bearer_header;
use crate::support::test_context;

#[actix_web::test]
async fn add_list_and_remove_a_cart_item() {
    let ctx = test_context().await;
    let diner = unique_email("diner");
    let auth = bearer_header(&diner, ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;
    let dish = unique_str("dish");

    let req = test::TestRequest::post()
        .uri("/carts")
        .set_json(json!({ "menuId": "m-1", "email": diner, "name": dish, "price": 7.25 }))
        .to_request();
    let inserted = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(inserted["acknowledged"], true);
    let id = inserted["insertedId"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);

    let req = test::TestRequest::get()
        .uri(&format!("/carts?email={diner}"))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let cart = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(cart.as_array().unwrap().len(), 1);
    assert_eq!(cart[0]["_id"], id.as_str());
    assert_eq!(cart[0]["name"], dish.as_str());

    let req = test::TestRequest::delete()
        .uri(&format!("/carts/{id}"))
        .to_request();
    let deleted = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(deleted["acknowledged"], true);
    assert_eq!(deleted["deletedCount"], 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/carts/{id}"))
        .to_request();
    let deleted = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(deleted["deletedCount"], 0);

    let req = test::TestRequest::get()
        .uri(&format!("/carts?email={diner}"))
        .insert_header(("Authorization", auth))
        .to_request();
    let cart = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(cart, json!([]));
}
