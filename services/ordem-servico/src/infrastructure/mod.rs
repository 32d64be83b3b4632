//! 基础设施层

pub mod cache;
pub mod notify;
pub mod persistence;
