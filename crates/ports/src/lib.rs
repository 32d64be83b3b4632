//! ports - 抽象 trait 层
//!
//! 定义查询缓存与用户通知的抽象接口

mod cache;
mod notifier;

pub use cache::*;
pub use notifier::*;
