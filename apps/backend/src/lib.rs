#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod payments;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod trace_ctx;


// Re-exports for public API
pub use auth::claims::IdentityClaims;
pub use auth::jwt::{mint_access_token, verify_access_token};
pub use config::{AppConfig, StoreProfile};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{Identity, JsonDocument, OwnerEmail, PathObjectId, ValidatedJson};
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::jwt_extract::JwtExtract;
pub use middleware::request_trace::RequestTrace;
pub use middleware::require_admin::RequireAdmin;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Prelude for test convenience
pub mod prelude {
    pub use super::auth::claims::*;
    pub use super::auth::gate::*;
    pub use super::auth::jwt::*;
    pub use super::error::*;
    pub use super::extractors::*;
    pub use super::infra::state::*;
    pub use super::middleware::*;
    pub use super::state::*;
    pub use super::store::{Collection, DocumentStore, MemoryStore, SharedStore};
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
