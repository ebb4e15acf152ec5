pub mod credential;
pub mod ownership;
