//! 运行时初始化

use config::{AppConfig, ConfigError};
use telemetry::{LogFormat, init_metrics, init_tracing};
use tracing::{info, warn};

/// 加载配置并初始化运行时
pub fn load_and_init(config_dir: &str) -> Result<AppConfig, ConfigError> {
    // 本地开发时从 .env 读取环境变量，文件不存在则忽略
    dotenvy::dotenv().ok();

    let config = AppConfig::load(config_dir)?;
    init_runtime(&config);
    Ok(config)
}

/// 初始化运行时（日志、指标）
pub fn init_runtime(config: &AppConfig) {
    let format = LogFormat::from_json_flag(config.json_logs());
    if let Err(e) = init_tracing(&config.telemetry.log_level, format) {
        warn!(error = %e, "Tracing subscriber already installed");
    }

    // 指标记录器只能安装一次，失败时仅降级为无指标
    if let Err(e) = init_metrics() {
        warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled");
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );
}
