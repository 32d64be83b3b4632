//! 报价单仓储接口

use async_trait::async_trait;
use errors::AppResult;

use crate::domain::enums::EstimateStatus;
use crate::domain::value_objects::EstimateId;

#[async_trait]
pub trait EstimateRepository: Send + Sync {
    /// 更新报价单状态
    async fn update_status(&self, id: &EstimateId, status: &EstimateStatus) -> AppResult<()>;
}
