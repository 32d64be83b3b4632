//! 库存调整
//!
//! 服务状态从完工前进入完工时扣减报价单配件库存，反向流转时归还

use async_trait::async_trait;
use errors::AppResult;
use serde::{Deserialize, Serialize};

use crate::domain::enums::{ServiceStatus, StatusPhase};
use crate::domain::value_objects::PartId;

/// 配件数量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartQuantity {
    pub part_id: PartId,
    pub quantity: i32,
}

impl PartQuantity {
    pub fn new(part_id: PartId, quantity: i32) -> Self {
        Self { part_id, quantity }
    }
}

/// 状态流转引起的库存效果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryEffect {
    /// 扣减库存
    Consume,
    /// 归还库存
    Restore,
    /// 无变化
    None,
}

impl InventoryEffect {
    /// 根据前后服务状态判定库存效果
    ///
    /// `next` 为 `None` 表示本次更新未修改服务状态或将其置空
    pub fn for_transition(previous: Option<&ServiceStatus>, next: Option<&ServiceStatus>) -> Self {
        let (Some(previous), Some(next)) = (previous, next) else {
            return Self::None;
        };

        match (previous.phase(), next.phase()) {
            (StatusPhase::PreCompletion, StatusPhase::Completion) => Self::Consume,
            (StatusPhase::Completion, StatusPhase::PreCompletion) => Self::Restore,
            _ => Self::None,
        }
    }

    /// 指标标签
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consume => "consume",
            Self::Restore => "restore",
            Self::None => "none",
        }
    }
}

/// 库存服务 trait
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// 按数量扣减配件库存
    async fn consume(&self, parts: &[PartQuantity]) -> AppResult<()>;

    /// 按数量归还配件库存
    async fn restore(&self, parts: &[PartQuantity]) -> AppResult<()>;
}
