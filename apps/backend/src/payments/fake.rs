use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use super::{PaymentError, PaymentGateway, PaymentIntent};

/// Gateway that never leaves the process. Records every intent it creates;
/// used by the test suites and by local runs without a payment key.
#[derive(Debug, Default)]
pub struct FakeGateway {
    created: Mutex<Vec<(i64, String)>>,
    reject_with: Option<String>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that rejects every request with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            reject_with: Some(reason.into()),
        }
    }

    /// `(amount, currency)` of every intent created so far.
    pub fn created(&self) -> Vec<(i64, String)> {
        self.created.lock().clone()
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if let Some(reason) = &self.reject_with {
            return Err(PaymentError::Rejected(reason.clone()));
        }
        self.created.lock().push((amount, currency.to_string()));

        let id = format!("pi_{}", Uuid::new_v4().simple());
        Ok(PaymentIntent {
            client_secret: format!("{id}_secret_fake"),
            id,
        })
    }
}
