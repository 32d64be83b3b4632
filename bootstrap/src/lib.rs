//! oficina-bootstrap - 统一启动骨架
//!
//! 加载配置、初始化遥测并创建共享的基础设施资源

mod infrastructure;
mod runtime;

pub use infrastructure::*;
pub use runtime::*;
