//! Redis 连接

use errors::{AppError, AppResult};
use redis::Client;
use redis::aio::ConnectionManager;
use tracing::debug;

/// 建立自动重连的 Redis 连接
pub async fn create_connection_manager(url: &str) -> AppResult<ConnectionManager> {
    let client = Client::open(url)
        .map_err(|e| AppError::external_service(format!("Redis 地址无效: {}", e)))?;

    let conn = ConnectionManager::new(client)
        .await
        .map_err(|e| AppError::external_service(format!("连接 Redis 失败: {}", e)))?;

    debug!("Redis connection manager ready");
    Ok(conn)
}

/// 发送 PING 确认 Redis 可用
pub async fn check_connection(conn: &mut ConnectionManager) -> AppResult<()> {
    let reply: String = redis::cmd("PING")
        .query_async(conn)
        .await
        .map_err(|e| AppError::external_service(format!("Redis PING 失败: {}", e)))?;

    if reply != "PONG" {
        return Err(AppError::external_service(format!(
            "Redis PING 返回异常: {}",
            reply
        )));
    }
    Ok(())
}
