use actix_web::test;
use bistro_backend::repos::{accounts, menu, payments};
use mongodb::bson::doc;
use serde_json::json;

use crate::common::read_ok_json;
use crate::support::app_builder::create_test_app;
use crate::support::auth::bearer_header;
use crate::support::test_context;

#[actix_web::test]
async fn admin_stats_counts_and_sums() {
    let ctx = test_context().await;
    let store = &*ctx.store;
    accounts::insert(store, doc! { "email": "boss@x.com", "role": "admin" })
        .await
        .unwrap();
    accounts::insert(store, doc! { "email": "a@x.com" }).await.unwrap();
    menu::insert(store, doc! { "name": "Soup" }).await.unwrap();
    payments::insert(store, doc! { "email": "a@x.com", "price": 10.1 })
        .await
        .unwrap();
    payments::insert(store, doc! { "email": "a@x.com", "price": 0.2 })
        .await
        .unwrap();

    let header = bearer_header("boss@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/admin-stats")
        .insert_header(("Authorization", header))
        .to_request();
    let json = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(
        json,
        json!({ "users": 2, "products": 1, "orders": 2, "revenue": 10.3 })
    );
}
