//! Cache trait 定义

use async_trait::async_trait;
use errors::AppResult;
use std::time::Duration;

/// 缓存 trait
///
/// 键为逻辑查询名（如 `ordens_servico`），值为序列化后的查询结果
#[async_trait]
pub trait CachePort: Send + Sync {
    /// 获取缓存值
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 设置缓存值
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()>;

    /// 删除缓存（失效）
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// 检查是否存在
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// 设置过期时间
    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<()>;
}
