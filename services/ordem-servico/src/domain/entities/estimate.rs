//! 报价单（orcamentos）及其明细

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{Part, Service};
use crate::domain::enums::EstimateStatus;
use crate::domain::value_objects::{CustomerId, EstimateId, PartId, ServiceId, VehicleId};

/// 报价单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub id: EstimateId,
    pub customer_id: Option<CustomerId>,
    pub vehicle_id: Option<VehicleId>,
    pub status: EstimateStatus,
    pub total: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// 报价单配件行（orcamento_pecas）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatePartLine {
    pub id: Uuid,
    pub part_id: PartId,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub part: Option<Part>,
}

/// 报价单服务行（orcamento_servicos）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateServiceLine {
    pub id: Uuid,
    pub service_id: ServiceId,
    pub quantity: i32,
    pub price: Option<Decimal>,
    pub service: Option<Service>,
}
