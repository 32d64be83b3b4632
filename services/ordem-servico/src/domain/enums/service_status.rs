//! 服务状态（status_servico）
//!
//! 数据库中以文本标签保存。未知标签原样保留，不参与库存调整。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 服务状态
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceStatus {
    /// 待处理
    Pending,
    /// 进行中
    InProgress,
    /// 等待配件
    AwaitingParts,
    /// 已完成
    Finished,
    /// 已交车
    Delivered,
    /// 已取消
    Cancelled,
    /// 其他标签
    Other(String),
}

/// 状态所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusPhase {
    /// 完工前：进行中、等待配件
    PreCompletion,
    /// 完工：已完成、已交车
    Completion,
    /// 不影响库存的状态
    Neutral,
}

impl ServiceStatus {
    pub const PENDING: &'static str = "Pendente";
    pub const IN_PROGRESS: &'static str = "Andamento";
    pub const AWAITING_PARTS: &'static str = "Aguardando Peças";
    pub const FINISHED: &'static str = "Finalizado";
    pub const DELIVERED: &'static str = "Entregue";
    pub const CANCELLED: &'static str = "Cancelado";

    /// 从数据库标签解析
    pub fn from_label(label: &str) -> Self {
        match label {
            Self::PENDING => Self::Pending,
            Self::IN_PROGRESS => Self::InProgress,
            Self::AWAITING_PARTS => Self::AwaitingParts,
            Self::FINISHED => Self::Finished,
            Self::DELIVERED => Self::Delivered,
            Self::CANCELLED => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }

    /// 数据库标签
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => Self::PENDING,
            Self::InProgress => Self::IN_PROGRESS,
            Self::AwaitingParts => Self::AWAITING_PARTS,
            Self::Finished => Self::FINISHED,
            Self::Delivered => Self::DELIVERED,
            Self::Cancelled => Self::CANCELLED,
            Self::Other(label) => label,
        }
    }

    pub fn phase(&self) -> StatusPhase {
        match self {
            Self::InProgress | Self::AwaitingParts => StatusPhase::PreCompletion,
            Self::Finished | Self::Delivered => StatusPhase::Completion,
            _ => StatusPhase::Neutral,
        }
    }

    pub fn is_completion(&self) -> bool {
        self.phase() == StatusPhase::Completion
    }

    pub fn is_pre_completion(&self) -> bool {
        self.phase() == StatusPhase::PreCompletion
    }
}

impl From<String> for ServiceStatus {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<&str> for ServiceStatus {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<ServiceStatus> for String {
    fn from(status: ServiceStatus) -> Self {
        match status {
            ServiceStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
