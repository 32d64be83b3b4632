//! 查询缓存实现

mod memory;

pub use memory::*;
