//! 服务工单（ordem_servico）

use chrono::{DateTime, Utc};
use errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::domain::enums::ServiceStatus;
use crate::domain::value_objects::{CustomerId, EstimateId, ServiceOrderId, VehicleId};

/// 服务工单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrder {
    pub id: ServiceOrderId,
    pub customer_id: CustomerId,
    /// 显式指定的车辆，为空时列表视图会回退到客户的第一辆车
    pub vehicle_id: Option<VehicleId>,
    pub estimate_id: Option<EstimateId>,
    /// 工单总体状态
    pub status: String,
    /// 服务状态，决定库存调整
    pub service_status: Option<ServiceStatus>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建工单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewServiceOrder {
    pub customer_id: CustomerId,
    pub vehicle_id: Option<VehicleId>,
    pub estimate_id: Option<EstimateId>,
    pub status: String,
    pub service_status: Option<ServiceStatus>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl NewServiceOrder {
    pub fn new(customer_id: CustomerId, status: impl Into<String>) -> Self {
        Self {
            customer_id,
            vehicle_id: None,
            estimate_id: None,
            status: status.into(),
            service_status: None,
            description: None,
            notes: None,
        }
    }

    pub fn with_vehicle(mut self, vehicle_id: VehicleId) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }

    pub fn with_estimate(mut self, estimate_id: EstimateId) -> Self {
        self.estimate_id = Some(estimate_id);
        self
    }

    pub fn with_service_status(mut self, status: ServiceStatus) -> Self {
        self.service_status = Some(status);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.status.trim().is_empty() {
            return Err(AppError::validation("工单状态不能为空"));
        }
        if let Some(status) = &self.service_status {
            validate_service_status(status)?;
        }
        Ok(())
    }
}

/// 工单部分更新
///
/// 外层 `None` 表示不修改该字段；可空字段用 `Some(None)` 表示清空
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceOrderPatch {
    pub customer_id: Option<CustomerId>,
    pub vehicle_id: Option<Option<VehicleId>>,
    pub estimate_id: Option<Option<EstimateId>>,
    pub status: Option<String>,
    pub service_status: Option<Option<ServiceStatus>>,
    pub description: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl ServiceOrderPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn with_vehicle(mut self, vehicle_id: Option<VehicleId>) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }

    pub fn with_estimate(mut self, estimate_id: Option<EstimateId>) -> Self {
        self.estimate_id = Some(estimate_id);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_service_status(mut self, status: ServiceStatus) -> Self {
        self.service_status = Some(Some(status));
        self
    }

    /// 将服务状态置空
    pub fn clear_service_status(mut self) -> Self {
        self.service_status = Some(None);
        self
    }

    /// 本次更新后的服务状态，`None` 表示未修改或被置空
    pub fn next_service_status(&self) -> Option<&ServiceStatus> {
        self.service_status.as_ref().and_then(Option::as_ref)
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.is_empty() {
            return Err(AppError::validation("没有需要更新的字段"));
        }
        if let Some(status) = &self.status {
            if status.trim().is_empty() {
                return Err(AppError::validation("工单状态不能为空"));
            }
        }
        if let Some(status) = self.next_service_status() {
            validate_service_status(status)?;
        }
        Ok(())
    }

    /// 将更新应用到工单上（用于内存实现和测试）
    pub fn apply_to(&self, order: &mut ServiceOrder) {
        if let Some(customer_id) = self.customer_id {
            order.customer_id = customer_id;
        }
        if let Some(vehicle_id) = self.vehicle_id {
            order.vehicle_id = vehicle_id;
        }
        if let Some(estimate_id) = self.estimate_id {
            order.estimate_id = estimate_id;
        }
        if let Some(status) = &self.status {
            order.status = status.clone();
        }
        if let Some(status) = &self.service_status {
            order.service_status = status.clone();
        }
        if let Some(description) = &self.description {
            order.description = description.clone();
        }
        if let Some(notes) = &self.notes {
            order.notes = notes.clone();
        }
        order.updated_at = Utc::now();
    }
}

fn validate_service_status(status: &ServiceStatus) -> AppResult<()> {
    if status.as_str().trim().is_empty() {
        return Err(AppError::validation("服务状态不能为空"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> ServiceOrder {
        let now = Utc::now();
        ServiceOrder {
            id: ServiceOrderId::new(),
            customer_id: CustomerId::new(),
            vehicle_id: Some(VehicleId::new()),
            estimate_id: None,
            status: "Aberta".to_string(),
            service_status: Some(ServiceStatus::InProgress),
            description: Some("Troca de óleo".to_string()),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        let err = ServiceOrderPatch::new().validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_blank_status_is_rejected() {
        assert!(ServiceOrderPatch::new().with_status("  ").validate().is_err());
        assert!(
            ServiceOrderPatch::new()
                .with_service_status(ServiceStatus::from_label(""))
                .validate()
                .is_err()
        );
        assert!(NewServiceOrder::new(CustomerId::new(), "").validate().is_err());
    }

    #[test]
    fn test_apply_patch_only_touches_present_fields() {
        let mut order = sample_order();
        let original = order.clone();

        ServiceOrderPatch::new()
            .with_service_status(ServiceStatus::Finished)
            .with_vehicle(None)
            .apply_to(&mut order);

        assert_eq!(order.service_status, Some(ServiceStatus::Finished));
        assert_eq!(order.vehicle_id, None);
        assert_eq!(order.status, original.status);
        assert_eq!(order.description, original.description);
        assert_eq!(order.customer_id, original.customer_id);
    }

    #[test]
    fn test_clear_service_status() {
        let mut order = sample_order();
        let patch = ServiceOrderPatch::new().clear_service_status();

        assert!(!patch.is_empty());
        assert!(patch.validate().is_ok());
        assert_eq!(patch.next_service_status(), None);

        patch.apply_to(&mut order);
        assert_eq!(order.service_status, None);
    }
}
