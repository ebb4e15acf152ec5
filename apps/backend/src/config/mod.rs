pub mod app;
pub mod store;

pub use app::AppConfig;
pub use store::StoreProfile;
