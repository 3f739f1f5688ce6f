//! Integration test harness for the Apiary storefront engine.
//!
//! Every test is self-contained: it boots the engine in-process on an
//! ephemeral port and wires it to mock collaborators spawned the same way —
//! an upstream catalog endpoint with switchable behavior and a webhook sink
//! standing in for the host's send-data endpoint.
//!
//! Run with: `cargo test -p apiary-integration-tests`

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use apiary_core::LanguageTag;
use apiary_storefront::config::{HostChannelConfig, StorefrontConfig};
use apiary_storefront::state::AppState;

/// What the mock upstream catalog serves.
#[derive(Debug, Clone)]
pub enum UpstreamMode {
    /// A well-formed `{ "items": [...] }` body.
    Items(serde_json::Value),
    /// A 200 with a body that is not JSON.
    Malformed,
    /// A 500 with no useful body.
    Failing,
}

/// In-process stand-in for the upstream catalog endpoint.
pub struct MockUpstream {
    /// Bound address.
    pub addr: SocketAddr,
    /// Number of fetches the engine performed, for single-attempt checks.
    pub hits: Arc<AtomicUsize>,
    mode: Arc<Mutex<UpstreamMode>>,
}

#[derive(Clone)]
struct UpstreamShared {
    mode: Arc<Mutex<UpstreamMode>>,
    hits: Arc<AtomicUsize>,
}

async fn serve_products(State(shared): State<UpstreamShared>) -> axum::response::Response {
    shared.hits.fetch_add(1, Ordering::SeqCst);
    match &*shared.mode.lock().await {
        UpstreamMode::Items(items) => Json(items.clone()).into_response(),
        UpstreamMode::Malformed => (StatusCode::OK, "this is not json").into_response(),
        UpstreamMode::Failing => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
    }
}

impl MockUpstream {
    /// Spawn the mock upstream with an initial behavior.
    pub async fn spawn(mode: UpstreamMode) -> Self {
        let mode = Arc::new(Mutex::new(mode));
        let hits = Arc::new(AtomicUsize::new(0));
        let shared = UpstreamShared {
            mode: Arc::clone(&mode),
            hits: Arc::clone(&hits),
        };

        let router = Router::new()
            .route("/api/products", get(serve_products))
            .with_state(shared);
        let addr = spawn_router(router).await;

        Self { addr, hits, mode }
    }

    /// Switch what subsequent fetches see.
    pub async fn set_mode(&self, mode: UpstreamMode) {
        *self.mode.lock().await = mode;
    }

    /// The products endpoint URL for the engine's configuration.
    #[must_use]
    pub fn products_url(&self) -> String {
        format!("http://{}/api/products", self.addr)
    }
}

/// In-process stand-in for the host's send-data endpoint.
pub struct WebhookSink {
    /// Bound address.
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn sink_order(
    State(received): State<Arc<Mutex<Vec<serde_json::Value>>>>,
    Json(payload): Json<serde_json::Value>,
) -> StatusCode {
    received.lock().await.push(payload);
    StatusCode::OK
}

impl WebhookSink {
    /// Spawn the sink.
    pub async fn spawn() -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/orders", post(sink_order))
            .with_state(Arc::clone(&received));
        let addr = spawn_router(router).await;

        Self { addr, received }
    }

    /// The endpoint URL for the engine's host channel configuration.
    #[must_use]
    pub fn orders_url(&self) -> String {
        format!("http://{}/orders", self.addr)
    }

    /// Await the first delivered payload; dispatch is fire-and-forget, so
    /// tests poll instead of reading a response.
    pub async fn wait_for_order(&self, timeout: Duration) -> Option<serde_json::Value> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Some(payload) = self.received.lock().await.first().cloned() {
                return Some(payload);
            }
            if tokio::time::Instant::now() >= deadline {
                return None;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

/// A running storefront engine under test.
pub struct TestApp {
    /// Base URL of the engine.
    pub base_url: String,
}

impl TestApp {
    /// Absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Configuration pointing the engine at the given collaborators.
#[must_use]
pub fn test_config(catalog_url: String, host_channel: Option<HostChannelConfig>) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://127.0.0.1:0".to_owned(),
        catalog_url,
        static_prefix: "/webapp".to_owned(),
        static_dir: "webapp".into(),
        default_lang: LanguageTag::Uz,
        placeholder_images: vec!["ph0".to_owned(), "ph1".to_owned(), "ph2".to_owned()],
        location_timeout_ms: 10_000,
        host_channel,
        sentry_dsn: None,
    }
}

/// Boot the engine against the given collaborators, performing the startup
/// catalog load exactly like the binary (a failure leaves the error state in
/// place for the tests to observe).
pub async fn spawn_app(catalog_url: String, host_channel: Option<HostChannelConfig>) -> TestApp {
    let state = AppState::new(test_config(catalog_url, host_channel))
        .expect("Failed to initialize application state");
    let _ = state.catalog().load().await;

    let addr = spawn_router(apiary_storefront::app(state)).await;
    TestApp {
        base_url: format!("http://{addr}"),
    }
}

/// A client with a cookie store, so one client is one session.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// The demo catalog used across tests: one mountain honey, one acacia honey
/// (with an empty Russian name), one neither.
#[must_use]
pub fn demo_catalog() -> serde_json::Value {
    serde_json::json!({
        "items": [
            {
                "id": "a",
                "name_uz": "Tog' asali",
                "name_ru": "Горный мёд",
                "desc_uz": "Sof tog' asali",
                "desc_ru": "Чистый горный мёд",
                "info_uz": "Tog'larda yig'ilgan asal",
                "price_1": 50000
            },
            {
                "id": "b",
                "name_uz": "Akatsiya asali",
                "name_ru": "",
                "info_short": "Oq akatsiya gullaridan",
                "price_per_kg": 30000
            },
            {
                "id": "c",
                "name_uz": "Paxta asali",
                "name_ru": "Хлопковый мёд",
                "price_1": 40000
            }
        ]
    })
}

async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server error");
    });
    addr
}
