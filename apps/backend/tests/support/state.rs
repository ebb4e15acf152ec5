use std::sync::Arc;

use bistro_backend::infra::state::build_state;
use bistro_backend::payments::FakeGateway;
use bistro_backend::state::app_state::AppState;
use bistro_backend::state::security_config::SecurityConfig;
use bistro_backend::store::MemoryStore;

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

/// State for one test: an isolated in-memory store and a recording
/// payment gateway, both reachable directly for arranging and asserting.
pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<FakeGateway>,
}

impl TestContext {
    pub fn security(&self) -> &SecurityConfig {
        &self.state.security
    }
}

pub async fn test_context() -> TestContext {
    test_context_with_gateway(FakeGateway::new()).await
}

pub async fn test_context_with_gateway(gateway: FakeGateway) -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let gateway = Arc::new(gateway);

    let state = build_state()
        .with_store(store.clone())
        .with_security(SecurityConfig::new(TEST_SECRET))
        .with_payments(gateway.clone())
        .build()
        .await
        .expect("test state should build");

    TestContext {
        state,
        store,
        gateway,
    }
}
