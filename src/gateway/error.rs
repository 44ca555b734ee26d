use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Required credential is missing. Raised before any request leaves the process.
    #[error("missing api credentials: {0} is not configured")]
    Configuration(&'static str),
    /// Access token exchange failed.
    #[error("failed to generate access token: {0}")]
    Auth(String),
    /// Order id that cannot be addressed as a single path segment.
    #[error("invalid order id: {0:?}")]
    InvalidOrderId(String),
    #[error("http request error: {0}")]
    Request(#[from] reqwest::Error),
    /// Processor answered with a body that is not json. Carries the raw text.
    #[error("processor returned unparseable response ({status}): {body}")]
    UnparseableResponse { status: StatusCode, body: String },
}
