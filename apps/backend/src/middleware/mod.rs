pub mod cors;
pub mod jwt_extract;
pub mod request_trace;
pub mod require_admin;
pub mod structured_logger;
pub mod trace_span;

pub use cors::cors_middleware;
pub use jwt_extract::JwtExtract;
pub use request_trace::{RequestTrace, TraceId};
pub use require_admin::RequireAdmin;
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
