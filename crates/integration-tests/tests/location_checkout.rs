//! Location capture semantics at the checkout boundary.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use apiary_storefront::config::HostChannelConfig;
use reqwest::StatusCode;
use serde_json::{Value, json};

use apiary_integration_tests::{
    MockUpstream, UpstreamMode, WebhookSink, client, demo_catalog, spawn_app,
};

#[tokio::test]
async fn sensor_failure_is_soft_and_never_blocks_checkout() {
    let upstream = MockUpstream::spawn(UpstreamMode::Items(demo_catalog())).await;
    let app = spawn_app(upstream.products_url(), None).await;
    let client = client();

    let capture: Value = client
        .post(app.url("/api/location"))
        .json(&json!({ "error": "User denied Geolocation", "address": "" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(capture["captured"], false);
    assert_eq!(
        capture["notice"],
        "Lokatsiyani aniqlab bo'lmadi. Iltimos, manzilni yozma kiriting."
    );
    assert!(capture.get("address_suggestion").is_none());

    // Checkout proceeds with manual address entry.
    client
        .post(app.url("/api/cart/increment"))
        .json(&json!({ "product_id": "a" }))
        .send()
        .await
        .unwrap();
    let response = client
        .post(app.url("/api/order"))
        .json(&json!({ "name": "Aziz", "phone": "998901234567", "address": "Chilonzor 5" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn a_lone_coordinate_counts_as_a_failed_capture() {
    let upstream = MockUpstream::spawn(UpstreamMode::Items(demo_catalog())).await;
    let app = spawn_app(upstream.products_url(), None).await;
    let client = client();

    let capture: Value = client
        .post(app.url("/api/location"))
        .json(&json!({ "lat": 41.3, "address": "" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(capture["captured"], false);
    assert!(capture["lat"].is_null());
    assert!(capture["lon"].is_null());
}

#[tokio::test]
async fn user_entered_address_is_never_overwritten() {
    let upstream = MockUpstream::spawn(UpstreamMode::Items(demo_catalog())).await;
    let app = spawn_app(upstream.products_url(), None).await;
    let client = client();

    let capture: Value = client
        .post(app.url("/api/location"))
        .json(&json!({ "lat": 41.3, "lon": 69.2, "address": "Chilonzor 5" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(capture["captured"], true);
    assert!(capture.get("address_suggestion").is_none());
}

#[tokio::test]
async fn an_order_without_capture_ships_null_coordinates() {
    let upstream = MockUpstream::spawn(UpstreamMode::Items(demo_catalog())).await;
    let sink = WebhookSink::spawn().await;
    let app = spawn_app(
        upstream.products_url(),
        Some(HostChannelConfig {
            endpoint: sink.orders_url(),
            token: None,
        }),
    )
    .await;
    let client = client();

    client
        .post(app.url("/api/cart/increment"))
        .json(&json!({ "product_id": "c" }))
        .send()
        .await
        .unwrap();
    let response = client
        .post(app.url("/api/order"))
        .json(&json!({ "name": "Aziz", "phone": "998901234567", "address": "Chilonzor 5" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = sink
        .wait_for_order(Duration::from_secs(2))
        .await
        .expect("order payload never reached the host channel");
    // The coordinate fields are present on the wire, explicitly null.
    assert!(payload["lat"].is_null());
    assert!(payload["lon"].is_null());
    assert_eq!(payload["address"], "Chilonzor 5");
}
