use serde::Serialize;

use crate::error::AppError;
use crate::repos::{accounts, menu, payments};
use crate::store::DocumentStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminStats {
    pub users: u64,
    pub products: u64,
    pub orders: u64,
    pub revenue: f64,
}

pub async fn admin_stats(store: &dyn DocumentStore) -> Result<AdminStats, AppError> {
    let users = accounts::count(store).await?;
    let products = menu::count(store).await?;
    let orders = payments::count(store).await?;
    let revenue = round_to_cents(payments::total_revenue(store).await?);

    Ok(AdminStats {
        users,
        products,
        orders,
        revenue,
    })
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
