use std::sync::Arc;

use reqwest::{StatusCode, Url};
use serde::Serialize;
use tracing::instrument;

pub use crate::gateway::error::GatewayError;
use crate::{config::Config, gateway::auth::authenticated_headers};

/// Unsigned identity assertion for partner calls
mod assertion;
mod auth;
mod error;
/// Secret and card data redaction for logs
pub mod mask;
/// Order creation and capture
pub mod order;
#[cfg(test)]
pub mod testing;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Processor answer that carried a json body.
///
/// Both variants are relayed to the frontend as-is, the tag only tells whether the processor
/// accepted the call.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorReply {
    Accepted {
        status: StatusCode,
        body: serde_json::Value,
    },
    Rejected {
        status: StatusCode,
        body: serde_json::Value,
    },
}

impl ProcessorReply {
    fn new(status: StatusCode, body: serde_json::Value) -> Self {
        if status.is_success() {
            Self::Accepted { status, body }
        } else {
            Self::Rejected { status, body }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Accepted { status, .. } | Self::Rejected { status, .. } => *status,
        }
    }

    pub fn body(&self) -> &serde_json::Value {
        match self {
            Self::Accepted { body, .. } | Self::Rejected { body, .. } => body,
        }
    }

    pub fn into_parts(self) -> (StatusCode, serde_json::Value) {
        match self {
            Self::Accepted { status, body } | Self::Rejected { status, body } => (status, body),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaypalGateway {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl PaypalGateway {
    pub fn new(config: Arc<Config>) -> Self {
        let client = reqwest::Client::new();
        Self { client, config }
    }

    /// Join path segments onto the processor base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.config.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Authenticated POST against the processor.
    ///
    /// A fresh token is requested for every call. Any json answer is returned with its status,
    /// whether the processor accepted the call or not.
    #[instrument(skip_all, fields(%url))]
    pub async fn post(&self, url: Url, body: Option<&impl Serialize>) -> Result<ProcessorReply> {
        let access_token = self.access_token().await?;
        let assertion = assertion::auth_assertion(
            self.config.client_id.as_deref(),
            self.config.merchant_id.as_deref(),
        );
        let headers = authenticated_headers(&access_token, &assertion)?;

        let mut request = self.client.post(url).headers(headers);
        if let Some(body) = body {
            tracing::debug!(data = %mask::secure_serializable(body), "Processor request");
            request = request.json(body);
        }
        let res = request.send().await?;
        let status = res.status();
        let text = res.text().await?;

        let body = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%status, "Processor response is not json: {e}");
                return Err(GatewayError::UnparseableResponse { status, body: text });
            }
        };
        tracing::debug!(data = %mask::secure_value(&body), %status, "Processor response");
        Ok(ProcessorReply::new(status, body))
    }
}
