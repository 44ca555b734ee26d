//! In-process stand-in for the processor, served on a loopback port.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use reqwest::Url;
use serde_json::json;

use crate::{
    config::Config,
    gateway::{PaypalGateway, auth::basic_credentials},
};

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const MERCHANT_ID: &str = "TESTMERCHANT";
pub const ACCESS_TOKEN: &str = "A21AAtest-access-token";
pub const ORDER_ID: &str = "ORDER123";

#[derive(Debug)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

/// How the token endpoint answers valid credentials.
#[derive(Debug, Default, Clone, Copy)]
pub enum TokenReply {
    #[default]
    Issued,
    MissingToken,
    EmptyToken,
    NotJson,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub token_reply: Mutex<TokenReply>,
    pub token_requests: AtomicUsize,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

pub struct FakeProcessor {
    pub state: Arc<FakeState>,
    pub base_url: Url,
}

async fn token(State(state): State<Arc<FakeState>>, headers: HeaderMap, body: String) -> Response {
    state.token_requests.fetch_add(1, Ordering::SeqCst);
    let expected = basic_credentials(CLIENT_ID, CLIENT_SECRET);
    let authorized = headers
        .get("authorization")
        .is_some_and(|v| v.as_bytes() == expected.as_bytes());
    let form = headers
        .get("content-type")
        .is_some_and(|v| v == "application/x-www-form-urlencoded");
    if !authorized || !form || body != "grant_type=client_credentials" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_client",
                "error_description": "Client Authentication failed",
            })),
        )
            .into_response();
    }
    let reply = *state.token_reply.lock().unwrap();
    match reply {
        TokenReply::Issued => {}
        TokenReply::MissingToken => return Json(json!({})).into_response(),
        TokenReply::EmptyToken => return Json(json!({ "access_token": "" })).into_response(),
        TokenReply::NotJson => return "<html>maintenance</html>".into_response(),
    }
    Json(json!({
        "scope": "https://uri.paypal.com/services/payments/payment",
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "app_id": "APP-80W284485P519543T",
        "expires_in": 32400,
    }))
    .into_response()
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "upstream exploded")
}

async fn record(State(state): State<Arc<FakeState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bearer = format!("Bearer {ACCESS_TOKEN}");
    if parts
        .headers
        .get("authorization")
        .is_none_or(|v| v.as_bytes() != bearer.as_bytes())
    {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_token" })),
        )
            .into_response();
    }

    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let path = parts.uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        headers: parts.headers,
        body: serde_json::from_slice(&bytes).ok(),
    });

    if path == "/v2/checkout/orders" {
        return (
            StatusCode::CREATED,
            Json(json!({ "id": ORDER_ID, "status": "PAYER_ACTION_REQUIRED" })),
        )
            .into_response();
    }
    let order_id = path
        .strip_prefix("/v2/checkout/orders/")
        .and_then(|rest| rest.strip_suffix("/capture"));
    match order_id {
        Some(ORDER_ID) => (
            StatusCode::CREATED,
            Json(json!({ "id": ORDER_ID, "status": "COMPLETED" })),
        )
            .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "name": "RESOURCE_NOT_FOUND",
                "message": "The specified resource does not exist.",
                "details": [{ "issue": "INVALID_RESOURCE_ID" }],
            })),
        )
            .into_response(),
    }
}

impl FakeProcessor {
    pub async fn spawn() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .route("/v1/oauth2/token", post(token))
            .route("/broken", post(broken))
            .fallback(record)
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let base_url = format!("http://{addr}").parse().unwrap();
        Self { state, base_url }
    }

    pub fn config(&self) -> Config {
        Config {
            client_id: Some(CLIENT_ID.into()),
            client_secret: Some(CLIENT_SECRET.into()),
            merchant_id: Some(MERCHANT_ID.into()),
            port: 0,
            base_url: self.base_url.clone(),
            static_dir: "client".into(),
        }
    }

    pub fn gateway(&self) -> PaypalGateway {
        self.gateway_with(self.config())
    }

    pub fn gateway_with(&self, config: Config) -> PaypalGateway {
        PaypalGateway::new(Arc::new(config))
    }
}
