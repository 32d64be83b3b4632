//! ordem-servico - 维修车间服务工单数据层
//!
//! 服务工单（ordem_servico）的查询、创建、更新与删除，
//! 以及状态流转触发的库存调整和查询缓存失效

pub mod application;
pub mod domain;
pub mod infrastructure;
