//! 基础设施资源管理

use adapter_postgres::{PostgresConfig, create_pool};
use adapter_redis::{RedisCache, create_connection_manager};
use config::AppConfig;
use errors::AppResult;
use redis::aio::ConnectionManager;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

/// 基础设施资源容器
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// PostgreSQL 连接池
    postgres_pool: PgPool,
    /// Redis 连接管理器（仅在缓存后端为 Redis 时创建）
    redis_conn: Option<ConnectionManager>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源，连接失败时直接返回错误
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections)
            .with_connect_timeout(Duration::from_secs(config.database.connect_timeout_secs))
            .with_application_name(&config.app_name);
        let postgres_pool = create_pool(&pg_config).await?;
        adapter_postgres::check_connection(&postgres_pool).await?;
        info!(
            "PostgreSQL connection pool created (max_connections: {})",
            config.database.max_connections
        );

        let redis_conn = match config.cache_redis() {
            Some(redis_config) => {
                let mut conn = create_connection_manager(redis_config.url.expose_secret()).await?;
                adapter_redis::check_connection(&mut conn).await?;
                info!("Redis connection created");
                Some(conn)
            }
            None => {
                info!("Redis cache backend not selected, skipping Redis connection");
                None
            }
        };

        Ok(Self {
            config,
            postgres_pool,
            redis_conn,
        })
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 获取 Redis 缓存（使用配置的命名空间）
    pub fn redis_cache(&self) -> Option<RedisCache> {
        self.redis_conn
            .clone()
            .map(|conn| RedisCache::new(conn, self.config.cache.namespace.clone()))
    }
}
