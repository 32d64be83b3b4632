//! 查询视图

mod service_order_details;

pub use service_order_details::*;
