//! Redis Cache 实现

use async_trait::async_trait;
use errors::{AppError, AppResult};
use ports::CachePort;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tracing::debug;

/// Redis Cache
///
/// 所有键都带命名空间前缀，多个应用可以共享同一个 Redis
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    namespace: String,
}

impl RedisCache {
    pub fn new(conn: ConnectionManager, namespace: impl Into<String>) -> Self {
        Self {
            conn,
            namespace: namespace.into(),
        }
    }

    /// 生成带命名空间的键
    pub fn namespaced_key(&self, key: &str) -> String {
        namespaced_key(&self.namespace, key)
    }
}

fn namespaced_key(namespace: &str, key: &str) -> String {
    if namespace.is_empty() {
        key.to_string()
    } else {
        format!("{}:{}", namespace, key)
    }
}

#[async_trait]
impl CachePort for RedisCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(self.namespaced_key(key))
            .await
            .map_err(|e| AppError::internal(format!("Redis get failed: {}", e)))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let key = self.namespaced_key(key);
        match ttl {
            Some(duration) => conn
                .set_ex(key, value, duration.as_secs())
                .await
                .map_err(|e| AppError::internal(format!("Redis set failed: {}", e))),
            None => conn
                .set(key, value)
                .await
                .map_err(|e| AppError::internal(format!("Redis set failed: {}", e))),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let key = self.namespaced_key(key);
        debug!(key = %key, "Invalidating Redis cache entry");
        conn.del(key)
            .await
            .map_err(|e| AppError::internal(format!("Redis delete failed: {}", e)))
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        conn.exists(self.namespaced_key(key))
            .await
            .map_err(|e| AppError::internal(format!("Redis exists failed: {}", e)))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.expire(self.namespaced_key(key), ttl.as_secs() as i64)
            .await
            .map_err(|e| AppError::internal(format!("Redis expire failed: {}", e)))
    }
}
