use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum_extra::headers::{self, HeaderMapExt};
use base64::{Engine, prelude::BASE64_STANDARD};
use serde::Deserialize;
use tracing::instrument;

use crate::gateway::{GatewayError, PaypalGateway, Result, mask};

/// Static partner attribution tag sent with every authenticated call.
pub const PARTNER_ATTRIBUTION_ID: &str = "BN-CODE";

const PARTNER_ATTRIBUTION_HEADER: HeaderName =
    HeaderName::from_static("paypal-partner-attribution-id");
const AUTH_ASSERTION_HEADER: HeaderName = HeaderName::from_static("paypal-auth-assertion");

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
}

pub fn basic_credentials(client_id: &str, secret: &str) -> String {
    let auth = BASE64_STANDARD.encode(format!("{client_id}:{secret}"));
    format!("Basic {auth}")
}

fn token_request_headers(client_id: &str, secret: &str) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    let value = HeaderValue::from_str(&basic_credentials(client_id, secret))
        .map_err(|_| GatewayError::Auth("credentials contain invalid header characters".into()))?;
    map.insert(axum::http::header::AUTHORIZATION, value);
    map.typed_insert(headers::ContentType::form_url_encoded());
    Ok(map)
}

pub fn authenticated_headers(access_token: &str, assertion: &str) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    let bearer = headers::Authorization::bearer(access_token)
        .map_err(|_| GatewayError::Auth("access token is not a valid bearer value".into()))?;
    map.typed_insert(bearer);
    map.typed_insert(headers::ContentType::json());
    map.insert(
        PARTNER_ATTRIBUTION_HEADER,
        HeaderValue::from_static(PARTNER_ATTRIBUTION_ID),
    );
    // Base64 output is always a valid header value.
    if let Ok(assertion) = HeaderValue::from_str(assertion) {
        map.insert(AUTH_ASSERTION_HEADER, assertion);
    }
    Ok(map)
}

impl PaypalGateway {
    /// Exchange client credentials for a fresh access token.
    ///
    /// Nothing is cached: every processor call goes through here first.
    #[instrument(skip_all)]
    pub async fn access_token(&self) -> Result<String> {
        let client_id = self
            .config
            .client_id
            .as_deref()
            .ok_or(GatewayError::Configuration("PAYPAL_CLIENT_ID"))?;
        let secret = self
            .config
            .client_secret
            .as_deref()
            .ok_or(GatewayError::Configuration("PAYPAL_CLIENT_SECRET"))?;

        let url = self.endpoint(&["v1", "oauth2", "token"]);
        tracing::debug!(%url, "Processor token request");
        let res = self
            .client
            .post(url)
            .headers(token_request_headers(client_id, secret)?)
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| GatewayError::Auth(format!("token request failed: {e}")))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| GatewayError::Auth(format!("failed to read token response: {e}")))?;
        if !status.is_success() {
            let body = serde_json::from_str::<serde_json::Value>(&text)
                .map(|v| mask::secure_value(&v).to_string())
                .unwrap_or(text);
            return Err(GatewayError::Auth(format!(
                "token endpoint responded with {status}: {body}"
            )));
        }

        let response: AccessTokenResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::Auth(format!("failed to decode token response: {e}")))?;
        match response.access_token {
            Some(token) if !token.is_empty() => {
                tracing::debug!(%status, "Processor token issued");
                Ok(token)
            }
            _ => Err(GatewayError::Auth("token response has no access_token".into())),
        }
    }
}
