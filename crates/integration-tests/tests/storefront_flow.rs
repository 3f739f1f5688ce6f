//! End-to-end storefront flow: bootstrap, browse, cart, checkout, dispatch.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use apiary_storefront::config::HostChannelConfig;
use reqwest::StatusCode;
use serde_json::{Value, json};

use apiary_integration_tests::{
    MockUpstream, UpstreamMode, WebhookSink, client, demo_catalog, spawn_app,
};

#[tokio::test]
async fn full_flow_dispatches_the_order_through_the_host_channel() {
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

    // Bootstrap as a Russian-speaking host user.
    let profile: Value = client
        .get(app.url("/api/bootstrap"))
        .header("x-user-language", "ru-RU")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["language"], "ru");
    assert_eq!(profile["main_button"]["label"], "Оформить");
    assert_eq!(profile["main_button"]["color"], "#FFD700");
    assert_eq!(profile["currency_word"], "сум");
    assert_eq!(profile["location"]["timeout_ms"], 10_000);

    // Full catalog, in catalog order, projected in Russian.
    let catalog: Value = client
        .get(app.url("/api/catalog"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = catalog["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["id"], "a");
    assert_eq!(items[0]["title"], "Горный мёд");
    assert_eq!(items[0]["price_label"], "50 000 сум");
    assert!(
        items[0]["image"]
            .as_str()
            .unwrap()
            .starts_with("/webapp/img/a.jpg?t=")
    );
    assert_eq!(items[0]["image_fallback"], "ph0");
    assert_eq!(items[1]["image_fallback"], "ph1");
    // Empty Russian name falls back to the primary text per field.
    assert_eq!(items[1]["title"], "Akatsiya asali");

    // Category tabs.
    for (cat, expected) in [("tog", vec!["a"]), ("akatsiya", vec!["b"]), ("other", vec!["c"])] {
        let filtered: Value = client
            .get(app.url(&format!("/api/catalog?cat={cat}")))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let ids: Vec<&str> = filtered["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, expected, "category {cat}");
    }

    // Info popup record.
    let info: Value = client
        .get(app.url("/api/catalog/a"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(info["title"], "Горный мёд");
    assert_eq!(info["message"], "Tog'larda yig'ilgan asal");

    // Build the cart: a, a, b.
    for (id, expected_count) in [("a", 1), ("a", 2), ("b", 3)] {
        let badge: Value = client
            .post(app.url("/api/cart/increment"))
            .json(&json!({ "product_id": id }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(badge["item_count"], expected_count);
    }

    let cart: Value = client
        .get(app.url("/api/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["item_count"], 3);
    assert_eq!(cart["distinct_count"], 2);
    assert_eq!(cart["total_label"], "130 000 сум");
    let rows = cart["rows"].as_array().unwrap();
    assert_eq!(rows[0]["product_id"], "a");
    assert_eq!(rows[0]["quantity"], 2);
    assert_eq!(rows[0]["line_total_label"], "100 000");
    assert_eq!(rows[1]["product_id"], "b");

    // Capture a location with an empty address field.
    let capture: Value = client
        .post(app.url("/api/location"))
        .json(&json!({ "lat": 41.311081, "lon": 69.240562, "address": "" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(capture["captured"], true);
    assert_eq!(
        capture["address_suggestion"],
        "Локация: 41.31108, 69.24056"
    );

    // Checkout.
    let response = client
        .post(app.url("/api/order"))
        .json(&json!({ "name": " Aziz ", "phone": "+998901234567", "address": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let confirmation: Value = response.json().await.unwrap();
    assert_eq!(confirmation["message"], "✅ Заказ принят! Мы скоро свяжемся.");
    assert_eq!(confirmation["dispatched_via_host"], true);

    // The payload reaches the host channel fire-and-forget.
    let payload = sink
        .wait_for_order(Duration::from_secs(2))
        .await
        .expect("order payload never reached the host channel");
    assert_eq!(payload["name"], "Aziz");
    assert_eq!(payload["phone"], "+998901234567");
    assert_eq!(payload["lat"], 41.311081);
    assert_eq!(payload["lon"], 69.240562);
    let items = payload["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], json!({ "id": "a", "qty": 2 }));
    assert_eq!(items[1], json!({ "id": "b", "qty": 1 }));
}

#[tokio::test]
async fn adjust_steppers_remove_and_reappend_entries() {
    let upstream = MockUpstream::spawn(UpstreamMode::Items(demo_catalog())).await;
    let app = spawn_app(upstream.products_url(), None).await;
    let client = client();

    for id in ["a", "b"] {
        client
            .post(app.url("/api/cart/increment"))
            .json(&json!({ "product_id": id }))
            .send()
            .await
            .unwrap();
    }

    // "-" on a at quantity 1 removes the entry entirely.
    let view: Value = client
        .post(app.url("/api/cart/adjust"))
        .json(&json!({ "product_id": "a", "delta": -1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<&str> = view["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["product_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["b"]);

    // Re-adding moves a to the end: insertion order of live keys.
    let view: Value = client
        .post(app.url("/api/cart/adjust"))
        .json(&json!({ "product_id": "a", "delta": 2 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<&str> = view["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["product_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["b", "a"]);

    // A deep negative delta clamps to removal, not negative quantities.
    let view: Value = client
        .post(app.url("/api/cart/adjust"))
        .json(&json!({ "product_id": "b", "delta": -5 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["item_count"], 2);
    assert_eq!(view["distinct_count"], 1);
}

#[tokio::test]
async fn empty_cart_submission_is_rejected_regardless_of_contact() {
    let upstream = MockUpstream::spawn(UpstreamMode::Items(demo_catalog())).await;
    let app = spawn_app(upstream.products_url(), None).await;
    let client = client();

    let response = client
        .post(app.url("/api/order"))
        .json(&json!({ "name": "Aziz", "phone": "+998901234567", "address": "Chilonzor 5" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Savatcha bo'sh!");
}

#[tokio::test]
async fn blank_contact_fields_are_rejected_after_trimming() {
    let upstream = MockUpstream::spawn(UpstreamMode::Items(demo_catalog())).await;
    let app = spawn_app(upstream.products_url(), None).await;
    let client = client();

    client
        .post(app.url("/api/cart/increment"))
        .json(&json!({ "product_id": "a" }))
        .send()
        .await
        .unwrap();

    let response = client
        .post(app.url("/api/order"))
        .json(&json!({ "name": "   ", "phone": "998901234567" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Iltimos, barcha ma'lumotlarni to'ldiring (Ism, Telefon, Manzil)."
    );

    // The cart is untouched; correcting the form succeeds.
    let response = client
        .post(app.url("/api/order"))
        .json(&json!({ "name": "Aziz", "phone": "998901234567" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_host_channel_falls_back_to_the_diagnostic_channel() {
    let upstream = MockUpstream::spawn(UpstreamMode::Items(demo_catalog())).await;
    let app = spawn_app(upstream.products_url(), None).await;
    let client = client();

    client
        .post(app.url("/api/cart/increment"))
        .json(&json!({ "product_id": "b" }))
        .send()
        .await
        .unwrap();

    let response = client
        .post(app.url("/api/order"))
        .json(&json!({ "name": "Aziz", "phone": "998901234567" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let confirmation: Value = response.json().await.unwrap();
    assert_eq!(confirmation["dispatched_via_host"], false);
    // The confirmation is still shown in the session language (uz default).
    assert_eq!(
        confirmation["message"],
        "✅ Buyurtmangiz qabul qilindi! Tez orada bog'lanamiz."
    );
}
