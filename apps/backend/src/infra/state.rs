use std::sync::Arc;

use tracing::{info, warn};

use crate::config::store::StoreProfile;
use crate::error::AppError;
use crate::payments::SharedGateway;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::store::{DocumentStore, MemoryStore, MongoStore, SharedStore};

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    store_profile: StoreProfile,
    store: Option<SharedStore>,
    payments: Option<SharedGateway>,
    verify_store: bool,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            store_profile: StoreProfile::Memory,
            store: None,
            payments: None,
            verify_store: false,
        }
    }

    pub fn with_store_profile(mut self, profile: StoreProfile) -> Self {
        self.store_profile = profile;
        self
    }

    /// Use an already-built store (takes precedence over the profile).
    pub fn with_store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_payments(mut self, payments: SharedGateway) -> Self {
        self.payments = Some(payments);
        self
    }

    /// Ping the store during `build` and fail fast when it is unreachable.
    pub fn verify_store(mut self) -> Self {
        self.verify_store = true;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let store: SharedStore = match self.store {
            Some(store) => store,
            None => match &self.store_profile {
                StoreProfile::Memory => {
                    warn!("using in-memory document store; data is lost on restart");
                    Arc::new(MemoryStore::new())
                }
                StoreProfile::Mongo { uri, database } => {
                    Arc::new(MongoStore::connect(uri, database).await?)
                }
            },
        };

        if self.verify_store {
            store.ping().await?;
            info!(store = %self.store_profile.describe(), "document store reachable");
        }

        let mut state = AppState::new(store, self.security_config);
        if let Some(payments) = self.payments {
            state = state.with_payments(payments);
        }
        Ok(state)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
