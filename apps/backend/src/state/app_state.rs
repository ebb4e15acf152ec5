use crate::error::AppError;
use crate::payments::{PaymentGateway, SharedGateway};
use crate::store::{DocumentStore, SharedStore};

use super::security_config::SecurityConfig;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Document store shared by every worker
    pub store: SharedStore,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Payment-intent gateway (absent when no payment key is configured)
    pub payments: Option<SharedGateway>,
}

impl AppState {
    pub fn new(store: SharedStore, security: SecurityConfig) -> Self {
        Self {
            store,
            security,
            payments: None,
        }
    }

    pub fn with_payments(mut self, payments: SharedGateway) -> Self {
        self.payments = Some(payments);
        self
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

/// The configured payment gateway, or a config error for the caller to return.
pub fn require_payments(state: &AppState) -> Result<&dyn PaymentGateway, AppError> {
    state
        .payments
        .as_deref()
        .ok_or_else(|| AppError::config("payment gateway not configured"))
}
