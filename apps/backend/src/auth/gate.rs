//! The three checks every protected route is built from: credential
//! verification, role authorization and the per-route ownership check.
//!
//! Each stage returns `Result<_, AppError>`: `Ok` continues the chain, `Err`
//! terminates the request. The middlewares in `crate::middleware` and the
//! handlers call these functions; nothing here touches actix types.

use crate::auth::claims::IdentityClaims;
use crate::auth::jwt::verify_access_token;
use crate::logging::security;
use crate::repos::accounts::{self, AccountRecord};
use crate::state::security_config::SecurityConfig;
use crate::store::DocumentStore;
use crate::AppError;

/// Pull the token out of an `Authorization` header value.
///
/// The value is split on single spaces and the second segment is the
/// token; the scheme word is not interpreted. An absent header or an
/// empty second segment is `UnauthorizedMissingBearer`.
pub fn extract_credential(header: Option<&str>) -> Result<&str, AppError> {
    header
        .and_then(|value| value.split(' ').nth(1))
        .filter(|token| !token.is_empty())
        .ok_or_else(AppError::unauthorized_missing_bearer)
}

/// Stage one: header value to verified identity.
pub fn verify_credential(
    header: Option<&str>,
    security: &SecurityConfig,
) -> Result<IdentityClaims, AppError> {
    let token = extract_credential(header)?;
    verify_access_token(token, security)
}

/// Stage two: the identity must map to an account record holding the
/// admin role. A missing record is the same as the default role.
pub async fn authorize_admin(
    store: &dyn DocumentStore,
    claims: &IdentityClaims,
) -> Result<AccountRecord, AppError> {
    match accounts::find_by_email(store, &claims.email).await? {
        Some(account) if account.role.is_admin() => Ok(account),
        _ => Err(AppError::insufficient_role()),
    }
}

/// Outcome of comparing a query-supplied email with the verified identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership<'a> {
    /// The caller asked for their own data.
    Owner(&'a str),
    /// No email was supplied; the handler answers with an empty set.
    Empty,
}

pub fn check_ownership<'a>(
    claims: &IdentityClaims,
    requested: Option<&'a str>,
) -> Result<Ownership<'a>, AppError> {
    match requested {
        None | Some("") => Ok(Ownership::Empty),
        Some(email) if email == claims.email => Ok(Ownership::Owner(email)),
        Some(email) => {
            security::ownership_denied(&claims.email, email);
            Err(AppError::forbidden())
        }
    }
}
