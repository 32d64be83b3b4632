//! PostgreSQL implementation of EstimateRepository

use async_trait::async_trait;
use errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::{EstimateId, EstimateRepository, EstimateStatus};

pub struct PostgresEstimateRepository {
    pool: PgPool,
}

impl PostgresEstimateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EstimateRepository for PostgresEstimateRepository {
    async fn update_status(&self, id: &EstimateId, status: &EstimateStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE orcamentos SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("更新报价单状态失败: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("报价单 {} 不存在", id)));
        }

        Ok(())
    }
}
