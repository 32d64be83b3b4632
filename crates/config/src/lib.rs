//! oficina-config - 配置加载库

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::Secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    // 开发环境: 10, 生产环境: 50
    match std::env::var("APP_ENV").as_deref() {
        Ok("production") => 50,
        _ => 10,
    }
}

fn default_connect_timeout_secs() -> u64 {
    30
}

/// Redis 配置
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: Secret<String>,
}

/// 查询缓存后端
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// 进程内缓存
    #[default]
    Memory,
    /// Redis 共享缓存
    Redis,
}

/// 查询缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_max_capacity")]
    pub max_capacity: u64,
    #[serde(default = "default_cache_namespace")]
    pub namespace: String,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_max_capacity() -> u64 {
    1_000
}

fn default_cache_namespace() -> String {
    "oficina".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            ttl_secs: default_cache_ttl_secs(),
            max_capacity: default_cache_max_capacity(),
            namespace: default_cache_namespace(),
        }
    }
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 强制 JSON 日志（生产环境默认开启）
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub database: DatabaseConfig,
    pub redis: Option<RedisConfig>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_app_name() -> String {
    "ordem-servico".to_string()
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序：`default.toml` → `{APP_ENV}.toml` → `OFICINA_` 前缀环境变量（`__` 分隔层级）
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(config_dir))
    }

    /// 构建配置来源
    pub fn figment(config_dir: &str) -> Figment {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("OFICINA_").split("__"))
    }

    /// 从任意配置来源提取
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    /// 查询缓存需要连接的 Redis，内存缓存后端时为 `None`
    pub fn cache_redis(&self) -> Option<&RedisConfig> {
        match self.cache.backend {
            CacheBackend::Redis => self.redis.as_ref(),
            CacheBackend::Memory => None,
        }
    }

    /// 是否使用 JSON 日志
    pub fn json_logs(&self) -> bool {
        self.telemetry.json || self.is_production()
    }
}
