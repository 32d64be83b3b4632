//! 应用层

pub mod cache_keys;
mod handler;
pub mod messages;
pub mod metrics;

pub use handler::*;
