//! Redaction of secrets and card data before processor payloads hit the logs.

use serde::Serialize;

const REDACTED: &str = "***";

/// Keep only the trailing four characters visible.
fn mask_tail(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();
    if len > 4 {
        "*".repeat(len - 4) + &chars[len - 4..].iter().collect::<String>()
    } else {
        value.to_string()
    }
}

/// Return true if a key name holds a credential that must never be logged.
fn is_secret_key(key: &str) -> bool {
    let k = key.to_lowercase();
    k.contains("token")
        || k.contains("secret")
        || k.contains("password")
        || k == "authorization"
        || k == "nonce"
}

/// Return true if a key name likely holds a PAN/card number.
fn is_pan_key(key: &str) -> bool {
    let k = key.to_lowercase();
    k == "pan"
        || k == "number"
        || k.contains("card") && (k.contains("number") || k.contains("num"))
        || k.contains("cardnumber")
}

/// Return true if a key name likely holds a CVV/CVC.
fn is_cvv_key(key: &str) -> bool {
    let k = key.to_lowercase();
    k.contains("cvv") || k.contains("cvc") || k.contains("security_code")
}

pub fn secure_serializable(v: impl Serialize) -> serde_json::Value {
    match serde_json::to_value(v) {
        Ok(value) => secure_value(&value),
        Err(_) => serde_json::Value::Null,
    }
}

pub fn secure_value(v: &serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match v {
        Value::Object(map) => {
            let mut new = serde_json::Map::with_capacity(map.len());
            for (k, val) in map {
                let new_val = match val {
                    Value::String(_) | Value::Number(_) if is_secret_key(k) || is_cvv_key(k) => {
                        Value::String(REDACTED.to_string())
                    }
                    Value::String(s) if is_pan_key(k) => Value::String(mask_tail(s)),
                    Value::Number(n) if is_pan_key(k) => Value::String(mask_tail(&n.to_string())),
                    _ => secure_value(val),
                };
                new.insert(k.clone(), new_val);
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(secure_value).collect()),
        other => other.clone(),
    }
}
