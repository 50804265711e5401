//! Payment processor client.

pub mod signature;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::secrets::SecretString;

/// Configuration for connecting to the payment processor.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Processor API address, e.g. `"https://api.razorpay.com"`.
    pub addr: String,

    /// Public key identifier.
    pub key_id: String,

    /// Private key secret, also used to verify callback signatures.
    pub key_secret: SecretString,
}

/// Order creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGatewayOrder {
    /// Amount in minor currency units.
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
}

/// Order as issued by the processor.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed")]
    Http(#[from] reqwest::Error),

    #[error("unexpected gateway response: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment order for `amount` minor units.
    async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, GatewayError>;

    /// Check a settlement callback signature over `"{order_id}|{payment_id}"`.
    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}

/// HTTP client for the payment processor's REST API.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    config: GatewayConfig,
    http: Client,
}

impl HttpPaymentGateway {
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/v1/orders", self.config.addr);

        let body = serde_json::json!({
            "amount": order.amount,
            "currency": order.currency,
            "receipt": order.receipt,
        });

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose()))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(format!(
                "order request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        signature::verify_payment_signature(&self.config.key_secret, order_id, payment_id, signature)
    }
}
