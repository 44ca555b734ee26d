use anyhow::Context;
use reqwest::Url;

const DEFAULT_PORT: u16 = 8888;
const DEFAULT_BASE_URL: &str = "https://api-m.sandbox.paypal.com";
const DEFAULT_STATIC_DIR: &str = "client";

/// Process-wide settings, read once at startup.
///
/// Credentials are kept optional here: a missing client id or secret is only an error once an
/// authenticated processor call is attempted.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub merchant_id: Option<String>,
    pub port: u16,
    pub base_url: Url,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {port}"))?,
            None => DEFAULT_PORT,
        };
        let base_url = var("PAYPAL_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url)
            .with_context(|| format!("PAYPAL_BASE_URL is not a valid url: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("PAYPAL_BASE_URL cannot be used as a base url: {base_url}");
        }

        Ok(Self {
            client_id: var("PAYPAL_CLIENT_ID"),
            client_secret: var("PAYPAL_CLIENT_SECRET"),
            merchant_id: var("MERCHANT_ID"),
            port,
            base_url,
            static_dir: var("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }
}
