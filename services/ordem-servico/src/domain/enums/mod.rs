//! 领域枚举

mod estimate_status;
mod service_status;

pub use estimate_status::*;
pub use service_status::*;
