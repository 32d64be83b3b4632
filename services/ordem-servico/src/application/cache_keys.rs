//! 查询缓存的逻辑键

/// 工单列表
pub const SERVICE_ORDERS: &str = "ordens_servico";

/// 报价单列表
pub const ESTIMATES: &str = "orcamentos";
