pub mod carts;
pub mod menu;
pub mod payments;
pub mod stats;
pub mod users;
