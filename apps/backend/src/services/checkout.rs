//! Payment intents and recorded payments.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use tracing::info;

use crate::auth::claims::IdentityClaims;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::payments::{to_minor_units, PaymentGateway, PaymentIntent, DEFAULT_CURRENCY};
use crate::repos::{carts, parse_object_id, payments};
use crate::store::DocumentStore;

/// Create a card payment intent for a display price in the default currency.
pub async fn create_intent(
    gateway: &dyn PaymentGateway,
    price: f64,
) -> Result<PaymentIntent, AppError> {
    let amount = to_minor_units(price)?;
    let intent = gateway.create_intent(amount, DEFAULT_CURRENCY).await?;
    info!(intent_id = %intent.id, amount, "Payment intent created");
    Ok(intent)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedPayment {
    pub inserted_id: ObjectId,
    pub deleted_count: u64,
}

/// Record a completed payment for the caller and clear the cart items it
/// paid for.
///
/// The stored `email` is always the verified identity's, whatever the
/// client sent. `price` must be a number and every `cartItems` entry a
/// valid object id; both are checked before anything is written.
pub async fn record_payment(
    store: &dyn DocumentStore,
    claims: &IdentityClaims,
    mut payment: Document,
) -> Result<RecordedPayment, AppError> {
    match payment.get("price") {
        Some(Bson::Double(price)) if price.is_finite() && *price >= 0.0 => {}
        Some(Bson::Int32(price)) if *price >= 0 => {}
        Some(Bson::Int64(price)) if *price >= 0 => {}
        _ => {
            return Err(AppError::bad_request(
                ErrorCode::InvalidPrice,
                "Payment requires a non-negative numeric price",
            ))
        }
    }

    let cart_ids = cart_item_ids(&payment)?;
    payment.insert("email", claims.email.as_str());

    let inserted_id = payments::insert(store, payment).await?;
    let deleted_count = carts::delete_many(store, &cart_ids).await?;
    info!(
        email = %Redacted(&claims.email),
        payment_id = %inserted_id,
        deleted_count,
        "Payment recorded"
    );

    Ok(RecordedPayment {
        inserted_id,
        deleted_count,
    })
}

fn cart_item_ids(payment: &Document) -> Result<Vec<ObjectId>, AppError> {
    let items = match payment.get("cartItems") {
        None | Some(Bson::Null) => return Ok(Vec::new()),
        Some(Bson::Array(items)) => items,
        Some(_) => {
            return Err(AppError::bad_request(
                ErrorCode::BadRequest,
                "cartItems must be an array of ids",
            ))
        }
    };

    items
        .iter()
        .map(|item| match item {
            Bson::String(raw) => parse_object_id(raw),
            Bson::ObjectId(id) => Ok(*id),
            other => Err(AppError::bad_request(
                ErrorCode::InvalidObjectId,
                format!("cartItems entry {other} is not an id"),
            )),
        })
        .collect()
}
