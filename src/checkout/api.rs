use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Request, State},
    response::IntoResponse,
    routing::post,
};
use tracing::instrument;

use crate::{
    checkout::{CheckoutError, Result},
    gateway::{PaypalGateway, ProcessorReply, mask},
    state::AppState,
};

#[instrument(skip_all)]
pub async fn create_order(
    State(gate): State<PaypalGateway>,
    CartPayload(cart): CartPayload,
) -> Result<ProcessorReply> {
    match gate.create_order(&cart).await {
        Ok(reply) => Ok(reply),
        Err(e) => {
            tracing::error!("Failed to create order: {e}");
            Err(CheckoutError::internal(CheckoutError::CREATE_FAILED))
        }
    }
}

#[instrument(skip_all, fields(%order_id))]
pub async fn capture_order(
    State(gate): State<PaypalGateway>,
    Path(order_id): Path<String>,
) -> Result<ProcessorReply> {
    match gate.capture_order(&order_id).await {
        Ok(reply) => Ok(reply),
        Err(e) => {
            tracing::error!("Failed to capture order: {e}");
            Err(CheckoutError::internal(CheckoutError::CAPTURE_FAILED))
        }
    }
}

impl IntoResponse for ProcessorReply {
    fn into_response(self) -> axum::response::Response {
        if let ProcessorReply::Rejected { status, body } = &self {
            tracing::warn!(%status, data = %mask::secure_value(body), "Relaying processor rejection");
        }
        let (status, body) = self.into_parts();
        (status, axum::Json(body)).into_response()
    }
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/api/orders", post(create_order))
        .route("/api/orders/{order_id}/capture", post(capture_order))
}

/// Whether the request declares a json body (`application/json` or a `+json` subtype).
fn has_json_content_type(req: &Request) -> bool {
    let Some(content_type) = req
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Cart from a `{ "cart": ... }` body.
///
/// Bodies without a json content type are not read at all and yield a null cart, as do empty
/// bodies and json values without a `cart` field. Only a json body that fails to parse is
/// rejected.
pub struct CartPayload(pub serde_json::Value);

impl<S> FromRequest<S> for CartPayload
where
    S: Send + Sync,
{
    type Rejection = CheckoutError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        if !has_json_content_type(&req) {
            tracing::debug!("Create order body is not json, continuing without cart");
            return Ok(Self(serde_json::Value::Null));
        }
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!("Failed to read request body: {e}");
            CheckoutError::bad_request(CheckoutError::INVALID_BODY)
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(serde_json::Value::Null));
        }
        match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(body) => Ok(Self(
                body.get("cart").cloned().unwrap_or(serde_json::Value::Null),
            )),
            Err(e) => {
                tracing::warn!("Failed to deserialize create order body: {e}");
                Err(CheckoutError::bad_request(CheckoutError::INVALID_BODY))
            }
        }
    }
}
