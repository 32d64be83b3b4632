//! 服务工单业务处理

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use errors::{AppError, AppResult};
use futures::future::try_join_all;
use ports::{CachePort, Notifier};
use tracing::{debug, error, info, warn};

use crate::domain::{
    EstimateRepository, EstimateStatus, InventoryEffect, InventoryService, NewServiceOrder,
    PartQuantity, ServiceOrder, ServiceOrderId, ServiceOrderPatch, ServiceOrderRepository,
    ServiceOrderWithDetails, VehicleRepository,
};

use super::cache_keys;
use super::messages;
use super::metrics::{record_cache_lookup, record_inventory_adjustment};

pub struct ServiceOrderHandler {
    order_repo: Arc<dyn ServiceOrderRepository>,
    vehicle_repo: Arc<dyn VehicleRepository>,
    estimate_repo: Arc<dyn EstimateRepository>,
    inventory: Arc<dyn InventoryService>,
    cache: Arc<dyn CachePort>,
    notifier: Arc<dyn Notifier>,
    cache_ttl: Option<Duration>,
    /// 每次失效递增，读取期间发生过失效的结果不写回缓存
    cache_generation: AtomicU64,
}

impl ServiceOrderHandler {
    pub fn new(
        order_repo: Arc<dyn ServiceOrderRepository>,
        vehicle_repo: Arc<dyn VehicleRepository>,
        estimate_repo: Arc<dyn EstimateRepository>,
        inventory: Arc<dyn InventoryService>,
        cache: Arc<dyn CachePort>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            order_repo,
            vehicle_repo,
            estimate_repo,
            inventory,
            cache,
            notifier,
            cache_ttl: None,
            cache_generation: AtomicU64::new(0),
        }
    }

    /// 设置列表缓存的 TTL（默认不过期，仅靠失效）
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    // ========== 查询 ==========

    /// 列出所有工单（按创建时间倒序），未关联车辆的工单附带客户的第一辆车
    pub async fn list_service_orders(&self) -> AppResult<Vec<ServiceOrderWithDetails>> {
        if let Some(cached) = self.read_cached_list().await {
            return Ok(cached);
        }

        let generation = self.cache_generation.load(Ordering::SeqCst);
        let orders = self.load_service_orders().await?;
        self.store_cached_list(&orders, generation).await;

        Ok(orders)
    }

    async fn load_service_orders(&self) -> AppResult<Vec<ServiceOrderWithDetails>> {
        let mut orders = self.order_repo.list_with_details().await?;

        let fallbacks = try_join_all(orders.iter().map(|details| async move {
            if !details.needs_fallback_vehicle() {
                return Ok(None);
            }
            self.vehicle_repo
                .find_first_by_customer(&details.order.customer_id)
                .await
        }))
        .await?;

        for (details, fallback) in orders.iter_mut().zip(fallbacks) {
            details.fallback_vehicle = fallback;
        }

        debug!(count = orders.len(), "Service orders loaded");
        Ok(orders)
    }

    async fn read_cached_list(&self) -> Option<Vec<ServiceOrderWithDetails>> {
        match self.cache.get(cache_keys::SERVICE_ORDERS).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(orders) => {
                    record_cache_lookup(true);
                    Some(orders)
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable service order cache entry");
                    record_cache_lookup(false);
                    None
                }
            },
            Ok(None) => {
                record_cache_lookup(false);
                None
            }
            Err(e) => {
                warn!(error = %e, "Service order cache unavailable, querying database");
                record_cache_lookup(false);
                None
            }
        }
    }

    async fn store_cached_list(&self, orders: &[ServiceOrderWithDetails], generation: u64) {
        if self.cache_generation.load(Ordering::SeqCst) != generation {
            debug!("Service orders changed while loading, skipping cache write");
            return;
        }

        let json = match serde_json::to_string(orders) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize service orders for cache");
                return;
            }
        };

        if let Err(e) = self
            .cache
            .set(cache_keys::SERVICE_ORDERS, &json, self.cache_ttl)
            .await
        {
            warn!(error = %e, "Failed to cache service orders");
            return;
        }

        // 写入与失效并发时撤回本次写入
        if self.cache_generation.load(Ordering::SeqCst) != generation {
            if let Err(e) = self.cache.delete(cache_keys::SERVICE_ORDERS).await {
                warn!(error = %e, "Failed to discard stale service order cache entry");
            }
        }
    }

    // ========== 变更 ==========

    /// 新建工单
    pub async fn create_service_order(&self, order: NewServiceOrder) -> AppResult<ServiceOrder> {
        info!(customer_id = %order.customer_id, "Creating service order");

        let created = self
            .run_mutation(
                "create",
                async {
                    order.validate()?;
                    self.order_repo.insert(&order).await
                },
                &[cache_keys::SERVICE_ORDERS],
                messages::ORDER_CREATED,
                messages::ORDER_CREATE_FAILED,
            )
            .await?;

        info!(order_id = %created.id, "Service order created");
        Ok(created)
    }

    /// 部分更新工单，服务状态跨越完工边界时调整库存
    pub async fn update_service_order(
        &self,
        id: &ServiceOrderId,
        patch: ServiceOrderPatch,
    ) -> AppResult<ServiceOrder> {
        info!(order_id = %id, "Updating service order");

        self.run_mutation(
            "update",
            self.apply_update(id, &patch),
            &[cache_keys::SERVICE_ORDERS],
            messages::ORDER_UPDATED,
            messages::ORDER_UPDATE_FAILED,
        )
        .await
    }

    /// 删除工单，关联的报价单回到待处理状态
    pub async fn delete_service_order(&self, id: &ServiceOrderId) -> AppResult<()> {
        info!(order_id = %id, "Deleting service order");

        self.run_mutation(
            "delete",
            self.remove(id),
            &[cache_keys::SERVICE_ORDERS, cache_keys::ESTIMATES],
            messages::ORDER_DELETED,
            messages::ORDER_DELETE_FAILED,
        )
        .await
    }

    async fn apply_update(
        &self,
        id: &ServiceOrderId,
        patch: &ServiceOrderPatch,
    ) -> AppResult<ServiceOrder> {
        patch.validate()?;

        let snapshot = self
            .order_repo
            .find_with_estimate_parts(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("服务工单 {} 不存在", id)))?;

        let updated = self.order_repo.update(id, patch).await?;

        let effect = InventoryEffect::for_transition(
            snapshot.order.service_status.as_ref(),
            patch.next_service_status(),
        );
        self.apply_inventory_effect(id, effect, &snapshot.estimate_parts)
            .await?;

        Ok(updated)
    }

    async fn apply_inventory_effect(
        &self,
        id: &ServiceOrderId,
        effect: InventoryEffect,
        parts: &[PartQuantity],
    ) -> AppResult<()> {
        if effect == InventoryEffect::None || parts.is_empty() {
            return Ok(());
        }

        info!(
            order_id = %id,
            direction = effect.as_str(),
            lines = parts.len(),
            "Adjusting inventory for service status transition"
        );

        match effect {
            InventoryEffect::Consume => self.inventory.consume(parts).await?,
            InventoryEffect::Restore => self.inventory.restore(parts).await?,
            InventoryEffect::None => {}
        }

        record_inventory_adjustment(effect, parts.len());
        Ok(())
    }

    async fn remove(&self, id: &ServiceOrderId) -> AppResult<()> {
        let order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("服务工单 {} 不存在", id)))?;

        self.order_repo.delete(id).await?;

        if let Some(estimate_id) = order.estimate_id {
            self.estimate_repo
                .update_status(&estimate_id, &EstimateStatus::Pending)
                .await?;
            debug!(order_id = %id, estimate_id = %estimate_id, "Estimate reset to pending");
        }

        Ok(())
    }

    /// 执行变更：成功时失效缓存并提示成功，失败时记录日志并提示错误
    async fn run_mutation<T>(
        &self,
        operation: &'static str,
        mutation: impl Future<Output = AppResult<T>>,
        invalidate: &[&str],
        success_message: &str,
        failure_message: &str,
    ) -> AppResult<T> {
        match mutation.await {
            Ok(value) => {
                self.invalidate(invalidate).await;
                self.notifier.success(success_message).await;
                Ok(value)
            }
            Err(e) => {
                error!(operation = operation, error = %e, "Service order mutation failed");
                self.notifier.error(failure_message).await;
                Err(e)
            }
        }
    }

    async fn invalidate(&self, keys: &[&str]) {
        self.cache_generation.fetch_add(1, Ordering::SeqCst);
        for key in keys {
            if let Err(e) = self.cache.delete(key).await {
                warn!(key = %key, error = %e, "Failed to invalidate cache entry");
            }
        }
    }
}
