//! 业务指标记录

use metrics::{counter, describe_counter};

use crate::domain::InventoryEffect;

/// 注册指标描述
pub fn describe_metrics() {
    describe_counter!(
        "service_order_inventory_adjustments_total",
        "Part lines adjusted by service status transitions"
    );
    describe_counter!("service_order_cache_total", "Service order list cache lookups");
}

/// 记录库存调整
pub fn record_inventory_adjustment(effect: InventoryEffect, lines: usize) {
    counter!("service_order_inventory_adjustments_total", "direction" => effect.as_str())
        .increment(lines as u64);
}

/// 记录列表缓存查询结果
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("service_order_cache_total", "result" => result).increment(1);
}
