//! Error codes for the Bistro backend.

pub mod error_code;

pub use error_code::ErrorCode;
