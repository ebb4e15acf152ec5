#![allow(dead_code)]

pub mod app_builder;
pub mod state;

pub use state::{test_context, TestContext};
