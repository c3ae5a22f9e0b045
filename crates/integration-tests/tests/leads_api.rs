//! Integration tests for the lead endpoints.
//!
//! Run with: cargo test -p bodega-integration-tests -- --ignored

use reqwest::StatusCode;
use reqwest::multipart::Form;
use serde_json::{Value, json};

use bodega_integration_tests::{base_url, client, unique_store_name};

/// Create a store and one product; returns (slug, `store_id`, `product_id`).
async fn seed_store_with_product() -> (String, i64, i64) {
    let form = Form::new().text("name", unique_store_name("Acme"));
    let store: Value = client()
        .post(format!("{}/stores", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("create store")
        .json()
        .await
        .expect("store body");
    let slug = store["slug"].as_str().expect("slug").to_owned();

    let detail: Value = client()
        .get(format!("{}/stores/{slug}", base_url()))
        .send()
        .await
        .expect("store detail")
        .json()
        .await
        .expect("store detail body");
    let store_id = detail["store"]["id"].as_i64().expect("store id");

    let form = Form::new()
        .text("slug", slug.clone())
        .text("name", "Widget");
    let product: Value = client()
        .post(format!("{}/products", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("create product")
        .json()
        .await
        .expect("product body");
    let product_id = product["id"].as_i64().expect("product id");

    (slug, store_id, product_id)
}

#[tokio::test]
#[ignore = "Requires running bodega-server"]
async fn test_lead_create_and_count() {
    let (slug, store_id, product_id) = seed_store_with_product().await;

    let resp = client()
        .post(format!("{}/leads", base_url()))
        .json(&json!({"productId": product_id, "storeId": store_id}))
        .send()
        .await
        .expect("create lead");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("lead body");
    assert_eq!(body["success"], true);
    assert!(body["leadId"].as_i64().is_some());

    let count: Value = client()
        .get(format!("{}/stores/{slug}/leads", base_url()))
        .send()
        .await
        .expect("count")
        .json()
        .await
        .expect("count body");
    assert_eq!(count["success"], true);
    assert_eq!(count["count"], 1);
}

#[tokio::test]
#[ignore = "Requires running bodega-server"]
async fn test_lead_requires_matching_store() {
    let (_, _, product_id) = seed_store_with_product().await;
    let (_, other_store_id, _) = seed_store_with_product().await;

    let resp = client()
        .post(format!("{}/leads", base_url()))
        .json(&json!({"productId": product_id, "storeId": other_store_id}))
        .send()
        .await
        .expect("create lead");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "Requires running bodega-server"]
async fn test_lead_missing_fields_is_rejected() {
    let resp = client()
        .post(format!("{}/leads", base_url()))
        .json(&json!({"productId": 1}))
        .send()
        .await
        .expect("create lead");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
