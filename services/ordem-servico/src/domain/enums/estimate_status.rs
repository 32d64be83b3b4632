//! 报价单状态

use serde::{Deserialize, Serialize};
use std::fmt;

/// 报价单状态
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EstimateStatus {
    /// 待处理（工单删除后回到此状态）
    Pending,
    /// 已批准
    Approved,
    /// 已拒绝
    Rejected,
    /// 其他标签
    Other(String),
}

impl EstimateStatus {
    pub const PENDING: &'static str = "Pendente";
    pub const APPROVED: &'static str = "Aprovado";
    pub const REJECTED: &'static str = "Recusado";

    pub fn from_label(label: &str) -> Self {
        match label {
            Self::PENDING => Self::Pending,
            Self::APPROVED => Self::Approved,
            Self::REJECTED => Self::Rejected,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => Self::PENDING,
            Self::Approved => Self::APPROVED,
            Self::Rejected => Self::REJECTED,
            Self::Other(label) => label,
        }
    }
}

impl From<String> for EstimateStatus {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<EstimateStatus> for String {
    fn from(status: EstimateStatus) -> Self {
        match status {
            EstimateStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
