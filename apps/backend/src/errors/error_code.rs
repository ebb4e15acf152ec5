//! Error codes for the Bistro backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE and maps 1:1 to the `code` field of
//! an error response body.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No Authorization header, or no token after the scheme
    UnauthorizedMissingBearer,
    /// Token failed signature verification or could not be decoded
    UnauthorizedInvalidJwt,
    /// Token is past its `exp`
    UnauthorizedExpiredJwt,
    /// Caller asked for another subject's resources
    Forbidden,
    /// Caller's account does not carry the admin role
    InsufficientRole,

    // Request Validation
    /// Path id is not a valid document id
    InvalidObjectId,
    /// Email missing or empty
    InvalidEmail,
    /// Price missing, non-positive or not finite
    InvalidPrice,
    /// General bad request error
    BadRequest,

    /// No route matches the request
    NotFound,

    // System Errors
    StoreError,
    StoreUnavailable,
    PaymentGatewayError,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Canonical response string for this code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",

            Self::InvalidObjectId => "INVALID_OBJECT_ID",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::BadRequest => "BAD_REQUEST",

            Self::NotFound => "NOT_FOUND",

            Self::StoreError => "STORE_ERROR",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::PaymentGatewayError => "PAYMENT_GATEWAY_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 15] = [
        Self::UnauthorizedMissingBearer,
        Self::UnauthorizedInvalidJwt,
        Self::UnauthorizedExpiredJwt,
        Self::Forbidden,
        Self::InsufficientRole,
        Self::InvalidObjectId,
        Self::InvalidEmail,
        Self::InvalidPrice,
        Self::BadRequest,
        Self::NotFound,
        Self::StoreError,
        Self::StoreUnavailable,
        Self::PaymentGatewayError,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
