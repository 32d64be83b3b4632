//! PostgreSQL 持久化

mod converters;
mod estimate;
mod inventory;
mod rows;
mod service_order;
mod vehicle;

pub use estimate::*;
pub use inventory::*;
pub use service_order::*;
pub use vehicle::*;
