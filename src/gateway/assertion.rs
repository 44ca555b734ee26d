use base64::{Engine, prelude::BASE64_STANDARD};
use serde_json::json;

/// Build the `PayPal-Auth-Assertion` value: an unsigned JWT with an empty signature segment.
///
/// Missing identifiers are encoded as `null`; the processor is the one to reject them.
pub fn auth_assertion(client_id: Option<&str>, merchant_id: Option<&str>) -> String {
    let header = json!({ "alg": "none" });
    let claims = json!({ "iss": client_id, "payer_id": merchant_id });
    let mut result = String::new();
    result.push_str(&BASE64_STANDARD.encode(header.to_string()));
    result.push('.');
    result.push_str(&BASE64_STANDARD.encode(claims.to_string()));
    result.push('.');
    result
}
