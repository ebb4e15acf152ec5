pub mod checkout;
pub mod stats;
pub mod users;
