//! 配件（pecas）与服务项目（servicos）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{PartId, ServiceId};

/// 配件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub code: Option<String>,
    pub price: Option<Decimal>,
    /// 当前库存数量
    pub stock_quantity: i32,
}

/// 服务项目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}
