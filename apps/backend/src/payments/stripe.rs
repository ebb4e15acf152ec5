use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{PaymentError, PaymentGateway, PaymentIntent};

const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Stripe PaymentIntents over the REST API.
#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
    secret_key: String,
    base_url: String,
}

// Keep the secret key out of Debug output.
impl std::fmt::Debug for StripeGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl StripeGateway {
    pub fn new(secret_key: impl Into<String>) -> Result<Self, PaymentError> {
        Self::with_base_url(secret_key, STRIPE_API_BASE)
    }

    /// Point the gateway at another API host (stripe-mock, a proxy).
    pub fn with_base_url(
        secret_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, PaymentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            secret_key: secret_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let amount_field = amount.to_string();
        let form = [
            ("amount", amount_field.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.base_url))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::OK {
            let intent: IntentResponse = response
                .json()
                .await
                .map_err(|e| PaymentError::Decode(e.to_string()))?;
            debug!(intent_id = %intent.id, amount, currency, "payment intent created");
            return Ok(PaymentIntent {
                id: intent.id,
                client_secret: intent.client_secret,
            });
        }

        let reason = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope
                .error
                .code
                .or(envelope.error.message)
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        };
        warn!(http.status_code = status.as_u16(), reason = %reason, "payment intent rejected");
        Err(PaymentError::Rejected(reason))
    }
}
