//! 用户通知实现

mod tracing_notifier;

pub use tracing_notifier::*;
