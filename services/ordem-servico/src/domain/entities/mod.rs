//! 领域实体

mod catalog;
mod customer;
mod estimate;
mod service_order;
mod vehicle;

pub use catalog::*;
pub use customer::*;
pub use estimate::*;
pub use service_order::*;
pub use vehicle::*;
