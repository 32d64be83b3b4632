//! PostgreSQL implementation of VehicleRepository

use async_trait::async_trait;
use errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::{CustomerId, Vehicle, VehicleRepository};

use super::converters::vehicle_from_row;
use super::rows::VehicleRow;

pub struct PostgresVehicleRepository {
    pool: PgPool,
}

impl PostgresVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PostgresVehicleRepository {
    async fn find_first_by_customer(&self, customer_id: &CustomerId) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, cliente_id, marca, modelo, ano, placa, cor
            FROM veiculos
            WHERE cliente_id = $1
            LIMIT 1
            "#,
        )
        .bind(customer_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询客户车辆失败: {}", e)))?;

        Ok(row.map(vehicle_from_row))
    }
}
