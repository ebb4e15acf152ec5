//! Identity claims carried by access tokens.

use serde::{Deserialize, Serialize};

/// Decoded payload of a verified access token, inserted into request
/// extensions by the `JwtExtract` middleware.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Subject identifier; the join key to the account record
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
