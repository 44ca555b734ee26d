use axum::http::StatusCode;
use serde::Serialize;

pub mod api;

pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Error body returned to the frontend. The message is fixed per route, details stay in logs.
#[derive(Debug, Serialize)]
pub struct CheckoutError {
    #[serde(skip)]
    status: StatusCode,
    error: &'static str,
}

impl std::error::Error for CheckoutError {}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.error)
    }
}

impl CheckoutError {
    pub const CREATE_FAILED: &'static str = "Failed to create order.";
    pub const CAPTURE_FAILED: &'static str = "Failed to capture order.";
    pub const INVALID_BODY: &'static str = "Invalid request body.";

    pub fn internal(error: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }

    pub fn bad_request(error: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl axum::response::IntoResponse for CheckoutError {
    fn into_response(self) -> axum::response::Response {
        (self.status, axum::Json(self)).into_response()
    }
}
