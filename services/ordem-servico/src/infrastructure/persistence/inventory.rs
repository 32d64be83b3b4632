//! PostgreSQL implementation of InventoryService
//!
//! 同一次调用内的所有配件调整在一个事务中完成

use async_trait::async_trait;
use errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::debug;

use crate::domain::{InventoryService, PartQuantity};

pub struct PostgresInventoryService {
    pool: PgPool,
}

impl PostgresInventoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 调整库存：扣减时数量取负
    async fn adjust(&self, parts: &[PartQuantity], consume: bool) -> AppResult<()> {
        if parts.is_empty() {
            return Ok(());
        }

        let deltas = parts
            .iter()
            .map(|line| stock_delta(line, consume).map(|delta| (line.part_id, delta)))
            .collect::<AppResult<Vec<_>>>()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("开启事务失败: {}", e)))?;

        for (part_id, delta) in deltas {
            let result = sqlx::query(
                "UPDATE pecas SET quantidade_estoque = quantidade_estoque + $1 WHERE id = $2",
            )
            .bind(delta)
            .bind(part_id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("调整配件库存失败: {}", e)))?;

            if result.rows_affected() == 0 {
                return Err(AppError::not_found(format!("配件 {} 不存在", part_id)));
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("提交库存事务失败: {}", e)))?;

        debug!(lines = parts.len(), consume, "Inventory adjusted");
        Ok(())
    }
}

#[async_trait]
impl InventoryService for PostgresInventoryService {
    async fn consume(&self, parts: &[PartQuantity]) -> AppResult<()> {
        self.adjust(parts, true).await
    }

    async fn restore(&self, parts: &[PartQuantity]) -> AppResult<()> {
        self.adjust(parts, false).await
    }
}

/// 单行配件的库存变化量
fn stock_delta(line: &PartQuantity, consume: bool) -> AppResult<i32> {
    if !consume {
        return Ok(line.quantity);
    }
    line.quantity.checked_neg().ok_or_else(|| {
        AppError::validation(format!("配件 {} 的数量 {} 超出范围", line.part_id, line.quantity))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PartId;

    #[test]
    fn test_stock_delta_direction() {
        let line = PartQuantity::new(PartId::new(), 2);
        assert_eq!(stock_delta(&line, true).unwrap(), -2);
        assert_eq!(stock_delta(&line, false).unwrap(), 2);
    }

    #[test]
    fn test_consuming_min_quantity_is_rejected() {
        let line = PartQuantity::new(PartId::new(), i32::MIN);
        let err = stock_delta(&line, true).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(stock_delta(&line, false).unwrap(), i32::MIN);
    }
}
