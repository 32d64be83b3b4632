//! ordem-servico - 服务工单诊断入口
//!
//! 加载配置并连接基础设施，输出带明细的工单列表（JSON）

use std::sync::Arc;
use std::time::Duration;

use bootstrap::{Infrastructure, load_and_init};
use config::CacheBackend;
use ports::CachePort;
use tracing::{info, warn};

use ordem_servico::application::{ServiceOrderHandler, metrics};
use ordem_servico::infrastructure::cache::MemoryQueryCache;
use ordem_servico::infrastructure::notify::TracingNotifier;
use ordem_servico::infrastructure::persistence::{
    PostgresEstimateRepository, PostgresInventoryService, PostgresServiceOrderRepository,
    PostgresVehicleRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_and_init("config")?;
    metrics::describe_metrics();

    info!("Initializing ordem-servico...");
    let infra = Infrastructure::from_config(config).await?;
    let cache_config = infra.config().cache.clone();
    let cache_ttl = Duration::from_secs(cache_config.ttl_secs);

    let cache: Arc<dyn CachePort> = match (cache_config.backend, infra.redis_cache()) {
        (CacheBackend::Redis, Some(redis)) => {
            info!(namespace = %cache_config.namespace, "Using Redis query cache");
            Arc::new(redis)
        }
        (CacheBackend::Redis, None) => {
            warn!("Redis cache requested but Redis is not configured, using memory cache");
            Arc::new(MemoryQueryCache::new(cache_config.max_capacity, Some(cache_ttl)))
        }
        (CacheBackend::Memory, _) => {
            info!("Using in-process query cache");
            Arc::new(MemoryQueryCache::new(cache_config.max_capacity, Some(cache_ttl)))
        }
    };

    let pool = infra.postgres_pool();
    let handler = ServiceOrderHandler::new(
        Arc::new(PostgresServiceOrderRepository::new(pool.clone())),
        Arc::new(PostgresVehicleRepository::new(pool.clone())),
        Arc::new(PostgresEstimateRepository::new(pool.clone())),
        Arc::new(PostgresInventoryService::new(pool)),
        cache,
        Arc::new(TracingNotifier),
    )
    .with_cache_ttl(cache_ttl);
    info!("Service order handler initialized");

    let orders = handler.list_service_orders().await?;
    info!(count = orders.len(), "Service orders listed");
    println!("{}", serde_json::to_string_pretty(&orders)?);

    Ok(())
}
