//! Shared fixtures for the integration suite: a configurable in-process mock
//! of the FXDesk backend, token builders, and client construction.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use fxdesk_client::config::Environment;
use fxdesk_client::models::{User, UserRole};
use fxdesk_client::session::Session;
use fxdesk_client::{ApiClient, Config};

/// Build an unsigned JWT with the given expiry
pub fn token_with_expiry(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    // A unique jti keeps two tokens minted in the same second from being
    // identical strings (the backend fixture matches tokens byte-for-byte)
    let payload = URL_SAFE_NO_PAD.encode(format!(
        r#"{{"sub":"tester","jti":"{}","exp":{}}}"#,
        Uuid::new_v4(),
        exp
    ));
    format!("{}.{}.sig", header, payload)
}

pub fn fresh_token() -> String {
    token_with_expiry(Utc::now().timestamp() + 3600)
}

pub fn expired_token() -> String {
    token_with_expiry(Utc::now().timestamp() - 60)
}

pub fn test_user() -> User {
    User {
        id: Uuid::new_v4(),
        email: "desk@fxdesk.example".to_string(),
        name: "Desk Operator".to_string(),
        role: UserRole::Client,
    }
}

pub fn seed_session(client: &ApiClient, access_token: &str) {
    client
        .session()
        .set_session(Session {
            user: test_user(),
            access_token: access_token.to_string(),
            refresh_token: "refresh-1".to_string(),
        })
        .unwrap();
}

/// Behavior knobs and counters for the mock backend
pub struct MockBackend {
    /// Token the backend hands out from /auth/refresh
    pub rotated_token: String,
    /// Tokens the resource endpoints accept as authorized
    pub accepted_tokens: Mutex<Vec<String>>,
    /// When set, resource endpoints reject every request with 401
    pub resource_always_401: AtomicBool,
    /// When set, /auth/refresh answers 401 instead of rotating
    pub refresh_always_401: AtomicBool,
    pub refresh_calls: AtomicUsize,
    pub resource_calls: AtomicUsize,
    /// X-Market header observed on each resource request, in order
    pub markets_seen: Mutex<Vec<String>>,
    /// Full header set observed on each resource request, in order
    pub resource_headers: Mutex<Vec<Vec<(String, String)>>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        let rotated = fresh_token();
        Arc::new(Self {
            rotated_token: rotated.clone(),
            accepted_tokens: Mutex::new(vec![rotated]),
            resource_always_401: AtomicBool::new(false),
            refresh_always_401: AtomicBool::new(false),
            refresh_calls: AtomicUsize::new(0),
            resource_calls: AtomicUsize::new(0),
            markets_seen: Mutex::new(Vec::new()),
            resource_headers: Mutex::new(Vec::new()),
        })
    }

    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        if self.resource_always_401.load(Ordering::SeqCst) {
            return false;
        }
        let bearer = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        match bearer {
            Some(token) => self
                .accepted_tokens
                .lock()
                .unwrap()
                .iter()
                .any(|t| t == token),
            None => false,
        }
    }

    fn record_resource_call(&self, headers: &HeaderMap) {
        self.resource_calls.fetch_add(1, Ordering::SeqCst);
        let market = headers
            .get("x-market")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("<missing>")
            .to_string();
        self.markets_seen.lock().unwrap().push(market);
        let recorded = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).to_string(),
                )
            })
            .collect();
        self.resource_headers.lock().unwrap().push(recorded);
    }

    /// Value of `name` on the `call`-th resource request, if it was sent
    pub fn header_on_call(&self, call: usize, name: &str) -> Option<String> {
        self.resource_headers
            .lock()
            .unwrap()
            .get(call)?
            .iter()
            .find(|(recorded, _)| recorded == name)
            .map(|(_, value)| value.clone())
    }
}

async fn refresh_handler(State(state): State<Arc<MockBackend>>) -> impl IntoResponse {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if state.refresh_always_401.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid refresh token"})),
        );
    }
    // Hold the exchange open long enough for concurrent callers to pile up
    tokio::time::sleep(Duration::from_millis(50)).await;
    (
        StatusCode::OK,
        Json(json!({"data": {"access_token": state.rotated_token}})),
    )
}

async fn metrics_handler(
    State(state): State<Arc<MockBackend>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.record_resource_call(&headers);
    if !state.is_authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"data": {
            "total_customers": 12,
            "total_vendors": 4,
            "pending_exchanges": 2,
            "pending_payment_orders": 1,
            "wallet": [
                {"currency": "USD", "balance": 2500.0},
                {"currency": "AED", "balance": 9100.5}
            ]
        }})),
    )
}

async fn customers_handler(
    State(state): State<Arc<MockBackend>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.record_resource_call(&headers);
    if !state.is_authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        );
    }
    let customer = json!({
        "id": Uuid::new_v4(),
        "name": "Al Madina Trading",
        "email": null,
        "phone": "+971-50-0000000",
        "created_at": "2026-01-05T09:00:00Z",
        "updated_at": "2026-01-05T09:00:00Z"
    });
    (
        StatusCode::OK,
        Json(json!({
            "data": [customer],
            "pagination": {"total": 1, "page": 1, "totalPages": 1}
        })),
    )
}

async fn login_handler(Json(body): Json<Value>) -> impl IntoResponse {
    if body.get("password").and_then(Value::as_str) == Some("correct-horse") {
        (
            StatusCode::OK,
            Json(json!({"data": {
                "access_token": fresh_token(),
                "refresh_token": "refresh-1",
                "user": {
                    "id": Uuid::new_v4(),
                    "email": body.get("email").and_then(Value::as_str).unwrap_or(""),
                    "name": "Desk Operator",
                    "role": "CLIENT"
                }
            }})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
    }
}

async fn logout_handler() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Start the mock backend on an ephemeral port
pub async fn spawn_backend(state: Arc<MockBackend>) -> SocketAddr {
    let app = Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/refresh", post(refresh_handler))
        .route("/dashboard/metrics", get(metrics_handler))
        .route("/customers", get(customers_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Build a client pointed at the mock backend with an isolated state dir
pub fn test_client(addr: SocketAddr) -> ApiClient {
    let dir = std::env::temp_dir().join(format!("fxdesk-test-{}", Uuid::new_v4()));
    test_client_with_dir(addr, dir)
}

/// Same as [`test_client`] but over a caller-controlled state dir, for
/// restart scenarios
pub fn test_client_with_dir(addr: SocketAddr, state_dir: std::path::PathBuf) -> ApiClient {
    let config = Config {
        api_base_url: format!("http://{}", addr),
        state_dir,
        request_timeout_seconds: 5,
        environment: Environment::Development,
        log_level: "info".to_string(),
    };
    ApiClient::new(&config).unwrap()
}
