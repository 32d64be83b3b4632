//! 车辆仓储接口

use async_trait::async_trait;
use errors::AppResult;

use crate::domain::entities::Vehicle;
use crate::domain::value_objects::CustomerId;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// 客户的第一辆车（顺序不保证，最多一条）
    async fn find_first_by_customer(&self, customer_id: &CustomerId) -> AppResult<Option<Vehicle>>;
}
