//! Account registration and role queries.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use tracing::{debug, info};

use crate::auth::claims::IdentityClaims;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::accounts;
use crate::store::DocumentStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Created(ObjectId),
    AlreadyExists,
}

/// Register an account from a client profile document. Idempotent on
/// `email`: a second registration creates nothing.
///
/// The client cannot pick its role; any `role` field is dropped and the
/// account starts with the default role.
pub async fn register(
    store: &dyn DocumentStore,
    mut profile: Document,
) -> Result<Registration, AppError> {
    let email = match profile.get_str("email") {
        Ok(email) if !email.trim().is_empty() => email.trim().to_string(),
        _ => {
            return Err(AppError::bad_request(
                ErrorCode::InvalidEmail,
                "Registration requires a non-empty email",
            ))
        }
    };

    profile.remove("role");
    profile.insert("email", email.as_str());

    match accounts::insert_if_absent(store, &email, profile).await? {
        Some(id) => {
            info!(email = %Redacted(&email), account_id = %id, "Account registered");
            Ok(Registration::Created(id))
        }
        None => {
            debug!(email = %Redacted(&email), "Registration for existing account");
            Ok(Registration::AlreadyExists)
        }
    }
}

/// Whether `email` holds the admin role. Callers may only ask about
/// themselves; asking about anyone else answers `false` without a lookup.
pub async fn is_admin(
    store: &dyn DocumentStore,
    claims: &IdentityClaims,
    email: &str,
) -> Result<bool, AppError> {
    if email != claims.email {
        return Ok(false);
    }
    Ok(accounts::find_by_email(store, email)
        .await?
        .is_some_and(|account| account.role.is_admin()))
}
