//! Security events emitted by the auth gate.

use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// The credential stage rejected a request. `reason` is an error code,
/// never token material.
pub fn credential_rejected(reason: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_CREDENTIAL_REJECTED",
        %trace_id,
        reason,
        path,
        "Credential verification failed"
    );
}

/// A verified identity lacked the elevated role.
pub fn role_denied(email: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ROLE_DENIED",
        %trace_id,
        email = %Redacted(email),
        path,
        "Insufficient role"
    );
}

/// A verified identity asked for another subject's data.
pub fn ownership_denied(email: &str, requested: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_OWNERSHIP_DENIED",
        %trace_id,
        email = %Redacted(email),
        requested = %Redacted(requested),
        "Ownership mismatch"
    );
}
