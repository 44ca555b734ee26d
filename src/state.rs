use std::sync::Arc;

use crate::{config::Config, gateway::PaypalGateway};

#[derive(Debug, Clone, axum::extract::FromRef)]
pub struct AppState {
    pub gate: PaypalGateway,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            gate: PaypalGateway::new(Arc::new(config)),
        }
    }
}
