//! 测试用内存实现

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use errors::{AppError, AppResult};
use ports::{CachePort, Notification, Notifier};
use tokio::sync::Notify;
use uuid::Uuid;

use ordem_servico::application::ServiceOrderHandler;
use ordem_servico::domain::{
    Customer, CustomerId, Estimate, EstimateId, EstimatePartLine, EstimateRepository,
    EstimateStatus, EstimateWithItems, InventoryEffect, InventoryService, NewServiceOrder, PartId,
    PartQuantity, ServiceOrder, ServiceOrderId, ServiceOrderPatch, ServiceOrderRepository,
    ServiceOrderSnapshot, ServiceOrderWithDetails, ServiceStatus, Vehicle, VehicleId,
    VehicleRepository,
};

/// 失败开关
#[derive(Debug, Clone, Copy, Default)]
pub struct Failures {
    pub insert: bool,
    pub update: bool,
    pub delete: bool,
    pub inventory: bool,
    pub estimate_update: bool,
}

#[derive(Default)]
struct State {
    orders: Vec<ServiceOrder>,
    customers: HashMap<CustomerId, Customer>,
    vehicles: Vec<Vehicle>,
    estimates: HashMap<EstimateId, EstimateStatus>,
    estimate_parts: HashMap<EstimateId, Vec<PartQuantity>>,
    stock: HashMap<PartId, i32>,
    inventory_calls: Vec<(InventoryEffect, Vec<PartQuantity>)>,
    estimate_updates: Vec<(EstimateId, EstimateStatus)>,
    list_calls: usize,
}

/// 内存版数据服务：同时充当工单、车辆、报价单仓储和库存服务
#[derive(Default)]
pub struct InMemoryWorkshop {
    state: Mutex<State>,
    failures: Mutex<Failures>,
}

impl InMemoryWorkshop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, configure: impl FnOnce(&mut Failures)) {
        configure(&mut *self.failures.lock().unwrap());
    }

    fn failures(&self) -> Failures {
        *self.failures.lock().unwrap()
    }

    pub fn add_customer(&self, name: &str) -> CustomerId {
        let id = CustomerId::new();
        self.state.lock().unwrap().customers.insert(
            id,
            Customer {
                id,
                name: name.to_string(),
                phone: None,
                email: None,
                document: None,
            },
        );
        id
    }

    pub fn add_vehicle(&self, customer_id: CustomerId, plate: &str) -> VehicleId {
        let id = VehicleId::new();
        self.state.lock().unwrap().vehicles.push(Vehicle {
            id,
            customer_id: Some(customer_id),
            brand: Some("Fiat".to_string()),
            model: Some("Uno".to_string()),
            year: Some(2015),
            plate: Some(plate.to_string()),
            color: None,
        });
        id
    }

    pub fn add_part(&self, stock: i32) -> PartId {
        let id = PartId::new();
        self.state.lock().unwrap().stock.insert(id, stock);
        id
    }

    pub fn add_estimate(&self, parts: Vec<PartQuantity>) -> EstimateId {
        let id = EstimateId::new();
        let mut state = self.state.lock().unwrap();
        state.estimates.insert(id, EstimateStatus::Approved);
        state.estimate_parts.insert(id, parts);
        id
    }

    /// 按插入顺序递增创建时间
    pub fn add_order(
        &self,
        customer_id: CustomerId,
        vehicle_id: Option<VehicleId>,
        estimate_id: Option<EstimateId>,
        service_status: Option<&str>,
    ) -> ServiceOrderId {
        let id = ServiceOrderId::new();
        let mut state = self.state.lock().unwrap();
        let created_at = Utc::now() + ChronoDuration::seconds(state.orders.len() as i64);
        state.orders.push(ServiceOrder {
            id,
            customer_id,
            vehicle_id,
            estimate_id,
            status: "Aberta".to_string(),
            service_status: service_status.map(ServiceStatus::from_label),
            description: None,
            notes: None,
            created_at,
            updated_at: created_at,
        });
        id
    }

    pub fn order(&self, id: &ServiceOrderId) -> Option<ServiceOrder> {
        let state = self.state.lock().unwrap();
        state.orders.iter().find(|o| o.id == *id).cloned()
    }

    pub fn stock(&self, part_id: &PartId) -> i32 {
        self.state.lock().unwrap().stock.get(part_id).copied().unwrap_or_default()
    }

    pub fn estimate_status(&self, id: &EstimateId) -> Option<EstimateStatus> {
        self.state.lock().unwrap().estimates.get(id).cloned()
    }

    pub fn inventory_calls(&self) -> Vec<(InventoryEffect, Vec<PartQuantity>)> {
        self.state.lock().unwrap().inventory_calls.clone()
    }

    pub fn estimate_updates(&self) -> Vec<(EstimateId, EstimateStatus)> {
        self.state.lock().unwrap().estimate_updates.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    fn adjust(&self, effect: InventoryEffect, parts: &[PartQuantity], sign: i32) -> AppResult<()> {
        if self.failures().inventory {
            return Err(AppError::database("库存服务不可用"));
        }

        let mut state = self.state.lock().unwrap();
        for line in parts {
            let stock = state
                .stock
                .get_mut(&line.part_id)
                .ok_or_else(|| AppError::not_found(format!("配件 {} 不存在", line.part_id)))?;
            *stock += sign * line.quantity;
        }
        state.inventory_calls.push((effect, parts.to_vec()));
        Ok(())
    }
}

#[async_trait]
impl ServiceOrderRepository for InMemoryWorkshop {
    async fn list_with_details(&self) -> AppResult<Vec<ServiceOrderWithDetails>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;

        let mut orders = state.orders.clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(orders
            .into_iter()
            .map(|order| {
                let customer = state.customers.get(&order.customer_id).cloned();
                let vehicle = order
                    .vehicle_id
                    .and_then(|id| state.vehicles.iter().find(|v| v.id == id).cloned());
                let estimate = order.estimate_id.and_then(|id| {
                    let status = state.estimates.get(&id)?.clone();
                    let parts: Vec<EstimatePartLine> = state
                        .estimate_parts
                        .get(&id)
                        .map(|parts| {
                            parts
                                .iter()
                                .map(|line| EstimatePartLine {
                                    id: Uuid::new_v4(),
                                    part_id: line.part_id,
                                    quantity: line.quantity,
                                    unit_price: None,
                                    part: None,
                                })
                                .collect()
                        })
                        .unwrap_or_default();
                    Some(EstimateWithItems {
                        estimate: Estimate {
                            id,
                            customer_id: Some(order.customer_id),
                            vehicle_id: order.vehicle_id,
                            status,
                            total: None,
                            created_at: order.created_at,
                        },
                        parts,
                        services: Vec::new(),
                    })
                });

                let mut details = ServiceOrderWithDetails::new(order);
                details.customer = customer;
                details.vehicle = vehicle;
                details.estimate = estimate;
                details
            })
            .collect())
    }

    async fn find_with_estimate_parts(
        &self,
        id: &ServiceOrderId,
    ) -> AppResult<Option<ServiceOrderSnapshot>> {
        let state = self.state.lock().unwrap();
        let Some(order) = state.orders.iter().find(|o| o.id == *id).cloned() else {
            return Ok(None);
        };
        let estimate_parts = order
            .estimate_id
            .and_then(|estimate_id| state.estimate_parts.get(&estimate_id).cloned())
            .unwrap_or_default();

        Ok(Some(ServiceOrderSnapshot {
            order,
            estimate_parts,
        }))
    }

    async fn find_by_id(&self, id: &ServiceOrderId) -> AppResult<Option<ServiceOrder>> {
        Ok(self.order(id))
    }

    async fn insert(&self, order: &NewServiceOrder) -> AppResult<ServiceOrder> {
        if self.failures().insert {
            return Err(AppError::database("新建服务工单失败"));
        }

        let now = Utc::now();
        let created = ServiceOrder {
            id: ServiceOrderId::new(),
            customer_id: order.customer_id,
            vehicle_id: order.vehicle_id,
            estimate_id: order.estimate_id,
            status: order.status.clone(),
            service_status: order.service_status.clone(),
            description: order.description.clone(),
            notes: order.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().orders.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &ServiceOrderId,
        patch: &ServiceOrderPatch,
    ) -> AppResult<ServiceOrder> {
        if self.failures().update {
            return Err(AppError::database("更新服务工单失败"));
        }

        let mut state = self.state.lock().unwrap();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == *id)
            .ok_or_else(|| AppError::not_found(format!("服务工单 {} 不存在", id)))?;
        patch.apply_to(order);
        Ok(order.clone())
    }

    async fn delete(&self, id: &ServiceOrderId) -> AppResult<()> {
        if self.failures().delete {
            return Err(AppError::database("删除服务工单失败"));
        }

        let mut state = self.state.lock().unwrap();
        let before = state.orders.len();
        state.orders.retain(|o| o.id != *id);
        if state.orders.len() == before {
            return Err(AppError::not_found(format!("服务工单 {} 不存在", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl VehicleRepository for InMemoryWorkshop {
    async fn find_first_by_customer(&self, customer_id: &CustomerId) -> AppResult<Option<Vehicle>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .vehicles
            .iter()
            .find(|v| v.customer_id == Some(*customer_id))
            .cloned())
    }
}

/// 首次查询车辆时暂停，直到测试放行
pub struct GatedVehicles {
    inner: Arc<InMemoryWorkshop>,
    pub entered: Notify,
    pub release: Notify,
    gated: AtomicBool,
}

impl GatedVehicles {
    pub fn new(inner: Arc<InMemoryWorkshop>) -> Self {
        Self {
            inner,
            entered: Notify::new(),
            release: Notify::new(),
            gated: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl VehicleRepository for GatedVehicles {
    async fn find_first_by_customer(&self, customer_id: &CustomerId) -> AppResult<Option<Vehicle>> {
        let vehicle = self.inner.find_first_by_customer(customer_id).await?;
        if self.gated.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(vehicle)
    }
}

#[async_trait]
impl EstimateRepository for InMemoryWorkshop {
    async fn update_status(&self, id: &EstimateId, status: &EstimateStatus) -> AppResult<()> {
        if self.failures().estimate_update {
            return Err(AppError::database("更新报价单状态失败"));
        }

        let mut state = self.state.lock().unwrap();
        let current = state
            .estimates
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("报价单 {} 不存在", id)))?;
        *current = status.clone();
        state.estimate_updates.push((*id, status.clone()));
        Ok(())
    }
}

#[async_trait]
impl InventoryService for InMemoryWorkshop {
    async fn consume(&self, parts: &[PartQuantity]) -> AppResult<()> {
        self.adjust(InventoryEffect::Consume, parts, -1)
    }

    async fn restore(&self, parts: &[PartQuantity]) -> AppResult<()> {
        self.adjust(InventoryEffect::Restore, parts, 1)
    }
}

/// 记录失效操作的缓存
#[derive(Default)]
pub struct RecordingCache {
    data: Mutex<HashMap<String, String>>,
    deleted: Mutex<Vec<String>>,
    should_fail: bool,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.lock().unwrap().contains_key(key)
    }

    pub fn put(&self, key: &str, value: &str) {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl CachePort for RecordingCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if self.should_fail {
            return Err(AppError::internal("Mock cache error"));
        }
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> AppResult<()> {
        if self.should_fail {
            return Err(AppError::internal("Mock cache error"));
        }
        self.put(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.deleted.lock().unwrap().push(key.to_string());
        if self.should_fail {
            return Err(AppError::internal("Mock cache error"));
        }
        self.data.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.data.lock().unwrap().contains_key(key))
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> AppResult<()> {
        Ok(())
    }
}

/// 记录通知的通知器
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

/// 组装好的处理器及其依赖
pub struct TestContext {
    pub workshop: Arc<InMemoryWorkshop>,
    pub cache: Arc<RecordingCache>,
    pub notifier: Arc<RecordingNotifier>,
    pub handler: ServiceOrderHandler,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_cache(RecordingCache::new())
    }

    pub fn with_cache(cache: RecordingCache) -> Self {
        let workshop = Arc::new(InMemoryWorkshop::new());
        Self::assemble(workshop.clone(), workshop, cache)
    }

    /// 车辆查询可被暂停的上下文
    pub fn with_gated_vehicles() -> (Self, Arc<GatedVehicles>) {
        let workshop = Arc::new(InMemoryWorkshop::new());
        let vehicles = Arc::new(GatedVehicles::new(workshop.clone()));
        let ctx = Self::assemble(workshop, vehicles.clone(), RecordingCache::new());
        (ctx, vehicles)
    }

    fn assemble(
        workshop: Arc<InMemoryWorkshop>,
        vehicles: Arc<dyn VehicleRepository>,
        cache: RecordingCache,
    ) -> Self {
        let cache = Arc::new(cache);
        let notifier = Arc::new(RecordingNotifier::default());

        let handler = ServiceOrderHandler::new(
            workshop.clone(),
            vehicles,
            workshop.clone(),
            workshop.clone(),
            cache.clone(),
            notifier.clone(),
        );

        Self {
            workshop,
            cache,
            notifier,
            handler,
        }
    }
}
