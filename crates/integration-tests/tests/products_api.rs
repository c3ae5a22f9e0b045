//! Integration tests for the product endpoints.
//!
//! Run with: cargo test -p bodega-integration-tests -- --ignored

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use bodega_integration_tests::{base_url, client, unique_store_name};

/// Create a store and return its slug.
async fn create_store(name: &str) -> String {
    let form = Form::new()
        .text("name", name.to_owned())
        .text("phone", "555-0100");

    let body: Value = client()
        .post(format!("{}/stores", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("Failed to create store")
        .json()
        .await
        .expect("Failed to parse response");

    body["slug"].as_str().expect("slug").to_owned()
}

/// Create a product in `slug`; returns the new product's id.
async fn create_product(slug: &str, name: &str, form: Form) -> i64 {
    let form = form.text("slug", slug.to_owned()).text("name", name.to_owned());

    let resp = client()
        .post(format!("{}/products", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    body["id"].as_i64().expect("product id")
}

#[tokio::test]
#[ignore = "Requires running bodega-server"]
async fn test_external_image_url_round_trips_verbatim() {
    let slug = create_store(&unique_store_name("Acme")).await;
    let external = "https://cdn.example.com/widget.png";

    let id = create_product(
        &slug,
        "Widget",
        Form::new()
            .text("price", "10")
            .text("image_url", external),
    )
    .await;

    // Detail endpoint
    let detail: Value = client()
        .get(format!("{}/products/{id}", base_url()))
        .send()
        .await
        .expect("detail")
        .json()
        .await
        .expect("detail body");
    assert_eq!(detail["product"]["imageUrl"], external);

    // Store-scoped listing
    let listing: Value = client()
        .get(format!("{}/stores/{slug}/products", base_url()))
        .send()
        .await
        .expect("listing")
        .json()
        .await
        .expect("listing body");
    let product = listing["products"]
        .as_array()
        .expect("products")
        .iter()
        .find(|p| p["id"].as_i64() == Some(id))
        .expect("created product in listing");
    assert_eq!(product["imageUrl"], external);
}

#[tokio::test]
#[ignore = "Requires running bodega-server"]
async fn test_uploaded_image_resolves_under_store_uploads() {
    let slug = create_store(&unique_store_name("Acme")).await;

    let id = create_product(
        &slug,
        "Widget",
        Form::new().part(
            "image",
            Part::bytes(b"png-bytes".to_vec()).file_name("widget.png"),
        ),
    )
    .await;

    let detail: Value = client()
        .get(format!("{}/products/{id}", base_url()))
        .send()
        .await
        .expect("detail")
        .json()
        .await
        .expect("detail body");

    assert_eq!(
        detail["product"]["imageUrl"],
        format!("/uploads/{slug}/widget.png")
    );
}

#[tokio::test]
#[ignore = "Requires running bodega-server"]
async fn test_product_detail_carries_store_summary() {
    let name = unique_store_name("Acme");
    let slug = create_store(&name).await;
    let id = create_product(&slug, "Widget", Form::new()).await;

    let detail: Value = client()
        .get(format!("{}/products/{id}", base_url()))
        .send()
        .await
        .expect("detail")
        .json()
        .await
        .expect("detail body");

    assert_eq!(detail["success"], true);
    assert_eq!(detail["product"]["store"]["slug"], slug.as_str());
    assert_eq!(detail["product"]["store"]["name"], name.as_str());
    assert_eq!(detail["product"]["store"]["phone"], "555-0100");
}

#[tokio::test]
#[ignore = "Requires running bodega-server"]
async fn test_update_product() {
    let slug = create_store(&unique_store_name("Acme")).await;
    let id = create_product(&slug, "Widget", Form::new().text("price", "10")).await;

    let form = Form::new()
        .text("name", "Widget Pro")
        .text("description", "Improved")
        .text("price", "12");

    let resp = client()
        .put(format!("{}/products/{id}", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("update");
    assert_eq!(resp.status(), StatusCode::OK);

    let detail: Value = client()
        .get(format!("{}/products/{id}", base_url()))
        .send()
        .await
        .expect("detail")
        .json()
        .await
        .expect("detail body");
    assert_eq!(detail["product"]["name"], "Widget Pro");
    assert_eq!(detail["product"]["price"], "12");
}

#[tokio::test]
#[ignore = "Requires running bodega-server"]
async fn test_unknown_product_is_404() {
    let resp = client()
        .get(format!("{}/products/999999999", base_url()))
        .send()
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running bodega-server"]
async fn test_create_product_for_unknown_store_is_404() {
    let form = Form::new()
        .text("slug", "no-such-store-anywhere")
        .text("name", "Widget");

    let resp = client()
        .post(format!("{}/products", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
