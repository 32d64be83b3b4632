//! 服务工单仓储接口

use async_trait::async_trait;
use errors::AppResult;

use crate::domain::entities::{NewServiceOrder, ServiceOrder, ServiceOrderPatch};
use crate::domain::value_objects::ServiceOrderId;
use crate::domain::views::{ServiceOrderSnapshot, ServiceOrderWithDetails};

/// 服务工单仓储接口
#[async_trait]
pub trait ServiceOrderRepository: Send + Sync {
    /// 按创建时间倒序列出所有工单，附带客户、车辆和报价单明细
    ///
    /// 不填充 `fallback_vehicle`
    async fn list_with_details(&self) -> AppResult<Vec<ServiceOrderWithDetails>>;

    /// 查找工单及其报价单配件清单
    async fn find_with_estimate_parts(
        &self,
        id: &ServiceOrderId,
    ) -> AppResult<Option<ServiceOrderSnapshot>>;

    /// 根据 ID 查找工单
    async fn find_by_id(&self, id: &ServiceOrderId) -> AppResult<Option<ServiceOrder>>;

    /// 新建工单并返回插入后的行
    async fn insert(&self, order: &NewServiceOrder) -> AppResult<ServiceOrder>;

    /// 部分更新工单，工单不存在时返回 NotFound
    async fn update(&self, id: &ServiceOrderId, patch: &ServiceOrderPatch)
    -> AppResult<ServiceOrder>;

    /// 删除工单，工单不存在时返回 NotFound
    async fn delete(&self, id: &ServiceOrderId) -> AppResult<()>;
}
