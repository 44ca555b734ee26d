use serde::Serialize;
use tracing::instrument;

use crate::gateway::{GatewayError, PaypalGateway, ProcessorReply, Result};

/// Amount charged for every order. The cart does not feed into it yet.
pub const ORDER_CURRENCY: &str = "USD";
pub const ORDER_VALUE: &str = "100.00";

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Capture,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderRequest {
    pub intent: Intent,
    pub purchase_units: Vec<PurchaseUnit>,
    pub payment_source: PaymentSource,
}

#[derive(Debug, Serialize)]
pub struct PurchaseUnit {
    pub amount: Amount,
}

#[derive(Debug, Serialize)]
pub struct Amount {
    pub currency_code: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PaymentSource {
    pub paypal: PaypalSource,
}

#[derive(Debug, Serialize)]
pub struct PaypalSource {
    pub experience_context: ExperienceContext,
}

#[derive(Debug, Serialize)]
pub struct ExperienceContext {
    pub payment_method_preference: &'static str,
    pub brand_name: &'static str,
    pub locale: &'static str,
    pub shipping_preference: &'static str,
    pub user_action: &'static str,
}

impl CreateOrderRequest {
    /// Fixed checkout payload. `_cart` is accepted so the call site stays stable once pricing
    /// is derived from it.
    pub fn from_cart(_cart: &serde_json::Value) -> Self {
        Self {
            intent: Intent::Capture,
            purchase_units: vec![PurchaseUnit {
                amount: Amount {
                    currency_code: ORDER_CURRENCY,
                    value: ORDER_VALUE,
                },
            }],
            payment_source: PaymentSource {
                paypal: PaypalSource {
                    experience_context: ExperienceContext {
                        payment_method_preference: "IMMEDIATE_PAYMENT_REQUIRED",
                        brand_name: "EXAMPLE INC",
                        locale: "en-US",
                        shipping_preference: "NO_SHIPPING",
                        user_action: "PAY_NOW",
                    },
                },
            },
        }
    }
}

impl PaypalGateway {
    #[instrument(skip_all)]
    pub async fn create_order(&self, cart: &serde_json::Value) -> Result<ProcessorReply> {
        tracing::info!(%cart, "Shopping cart information passed from the frontend");
        let url = self.endpoint(&["v2", "checkout", "orders"]);
        let payload = CreateOrderRequest::from_cart(cart);
        let reply = self.post(url, Some(&payload)).await?;
        tracing::info!(status = %reply.status(), id = ?reply.body().get("id"), "Create order reply");
        Ok(reply)
    }

    #[instrument(skip_all, fields(%order_id))]
    pub async fn capture_order(&self, order_id: &str) -> Result<ProcessorReply> {
        if order_id.is_empty() || order_id == "." || order_id == ".." {
            return Err(GatewayError::InvalidOrderId(order_id.to_string()));
        }
        let url = self.endpoint(&["v2", "checkout", "orders", order_id, "capture"]);
        let reply = self.post(url, None::<&serde_json::Value>).await?;
        tracing::info!(status = %reply.status(), "Capture order reply");
        Ok(reply)
    }
}
