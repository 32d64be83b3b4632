//! 进程内查询缓存（Moka）
//!
//! 未配置 Redis 时使用，单进程内有效

use async_trait::async_trait;
use errors::AppResult;
use moka::Expiry;
use moka::future::Cache as MokaCache;
use ports::CachePort;
use std::time::{Duration, Instant};

/// 缓存条目：值及其专属 TTL
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    ttl: Option<Duration>,
}

/// 按条目 TTL 过期，未指定时使用默认 TTL
struct EntryExpiry {
    default_ttl: Option<Duration>,
}

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl.or(self.default_ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl.or(self.default_ttl)
    }
}

/// 进程内查询缓存
#[derive(Clone)]
pub struct MemoryQueryCache {
    inner: MokaCache<String, CacheEntry>,
}

impl MemoryQueryCache {
    /// `default_ttl` 为 `None` 时条目只靠失效移除
    pub fn new(max_capacity: u64, default_ttl: Option<Duration>) -> Self {
        let inner = MokaCache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry { default_ttl })
            .build();

        Self { inner }
    }
}

#[async_trait]
impl CachePort for MemoryQueryCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self.inner.get(key).await.map(|entry| entry.value);
        tracing::debug!(key = %key, hit = value.is_some(), "Memory cache lookup");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        self.inner
            .insert(
                key.to_string(),
                CacheEntry {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.invalidate(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.inner.contains_key(key))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<()> {
        if let Some(mut entry) = self.inner.get(key).await {
            entry.ttl = Some(ttl);
            self.inner.insert(key.to_string(), entry).await;
        }
        Ok(())
    }
}
