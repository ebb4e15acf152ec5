//! Payment-intent gateway.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod fake;
pub mod stripe;

pub use fake::FakeGateway;
pub use stripe::StripeGateway;

/// Currency used for every intent the storefront creates.
pub const DEFAULT_CURRENCY: &str = "usd";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("payment provider rejected the request: {0}")]
    Rejected(String),
    #[error("payment provider unreachable: {0}")]
    Transport(String),
    #[error("unexpected payment provider response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait PaymentGateway: Debug + Send + Sync {
    /// Create an intent for `amount` minor units of `currency`.
    async fn create_intent(&self, amount: i64, currency: &str)
        -> Result<PaymentIntent, PaymentError>;
}

pub type SharedGateway = Arc<dyn PaymentGateway>;

/// Convert a display price (e.g. `12.5`) to minor units (`1250`).
pub fn to_minor_units(price: f64) -> Result<i64, PaymentError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(PaymentError::InvalidAmount(format!(
            "price must be a positive number, got {price}"
        )));
    }
    let minor = (price * 100.0).round();
    if minor < 1.0 || minor > i64::MAX as f64 {
        return Err(PaymentError::InvalidAmount(format!(
            "price {price} is out of range"
        )));
    }
    Ok(minor as i64)
}
