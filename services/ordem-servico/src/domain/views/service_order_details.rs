//! 工单详情视图
//!
//! 工单连同客户、车辆和报价单明细一起返回的反规范化视图

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Customer, Estimate, EstimatePartLine, EstimateServiceLine, ServiceOrder, Vehicle,
};
use crate::domain::inventory::PartQuantity;

/// 带明细的报价单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateWithItems {
    #[serde(flatten)]
    pub estimate: Estimate,
    pub parts: Vec<EstimatePartLine>,
    pub services: Vec<EstimateServiceLine>,
}

impl EstimateWithItems {
    /// 配件数量清单
    pub fn part_quantities(&self) -> Vec<PartQuantity> {
        self.parts
            .iter()
            .map(|line| PartQuantity::new(line.part_id, line.quantity))
            .collect()
    }
}

/// 工单详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrderWithDetails {
    #[serde(flatten)]
    pub order: ServiceOrder,
    pub customer: Option<Customer>,
    /// 工单显式关联的车辆
    pub vehicle: Option<Vehicle>,
    pub estimate: Option<EstimateWithItems>,
    /// 工单未关联车辆时，客户的第一辆车（仅用于展示，不回写）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_vehicle: Option<Vehicle>,
}

impl ServiceOrderWithDetails {
    pub fn new(order: ServiceOrder) -> Self {
        Self {
            order,
            customer: None,
            vehicle: None,
            estimate: None,
            fallback_vehicle: None,
        }
    }

    /// 是否需要查找回退车辆
    pub fn needs_fallback_vehicle(&self) -> bool {
        self.order.vehicle_id.is_none()
    }

    /// 展示用车辆：优先显式车辆，其次回退车辆
    pub fn display_vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref().or(self.fallback_vehicle.as_ref())
    }
}

/// 更新前的工单快照：工单本身及其报价单配件清单
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOrderSnapshot {
    pub order: ServiceOrder,
    pub estimate_parts: Vec<PartQuantity>,
}
