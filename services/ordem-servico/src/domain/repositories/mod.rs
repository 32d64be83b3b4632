//! 仓储接口

mod estimate_repository;
mod service_order_repository;
mod vehicle_repository;

pub use estimate_repository::*;
pub use service_order_repository::*;
pub use vehicle_repository::*;
