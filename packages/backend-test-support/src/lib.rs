//! Helpers shared by the backend's integration tests: idempotent logging
//! setup, unique test data and assertions on the JSON error contract.

pub mod error_body;
pub mod logging;
pub mod unique_helpers;
