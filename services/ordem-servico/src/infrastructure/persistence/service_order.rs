//! PostgreSQL implementation of ServiceOrderRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use errors::{AppError, AppResult};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::{
    EstimatePartLine, EstimateServiceLine, EstimateWithItems, NewServiceOrder, ServiceOrder,
    ServiceOrderId, ServiceOrderPatch, ServiceOrderRepository, ServiceOrderSnapshot,
    ServiceOrderWithDetails,
};

use super::converters::{
    estimate_from_row, estimate_part_from_row, estimate_service_from_row, part_quantity_from_row,
    service_order_details_from_row, service_order_from_row,
};
use super::rows::{
    EstimatePartRow, EstimateRow, EstimateServiceRow, PartQuantityRow, SERVICE_ORDER_COLUMNS,
    ServiceOrderDetailRow, ServiceOrderRow,
};

pub struct PostgresServiceOrderRepository {
    pool: PgPool,
}

impl PostgresServiceOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 批量加载报价单及其配件、服务明细
    async fn load_estimates(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, EstimateWithItems>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let estimates = sqlx::query_as::<_, EstimateRow>(
            r#"
            SELECT id, cliente_id, veiculo_id, status, valor_total, created_at
            FROM orcamentos
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询报价单失败: {}", e)))?;

        let part_rows = sqlx::query_as::<_, EstimatePartRow>(
            r#"
            SELECT op.id, op.orcamento_id, op.peca_id, op.quantidade, op.valor_unitario,
                   p.id AS p_id, p.nome AS p_nome, p.codigo AS p_codigo,
                   p.preco AS p_preco, p.quantidade_estoque AS p_quantidade_estoque
            FROM orcamento_pecas op
            LEFT JOIN pecas p ON p.id = op.peca_id
            WHERE op.orcamento_id = ANY($1)
            ORDER BY op.orcamento_id, op.id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询报价单配件失败: {}", e)))?;

        let service_rows = sqlx::query_as::<_, EstimateServiceRow>(
            r#"
            SELECT os.id, os.orcamento_id, os.servico_id, os.quantidade, os.valor,
                   s.id AS s_id, s.nome AS s_nome, s.descricao AS s_descricao, s.valor AS s_valor
            FROM orcamento_servicos os
            LEFT JOIN servicos s ON s.id = os.servico_id
            WHERE os.orcamento_id = ANY($1)
            ORDER BY os.orcamento_id, os.id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询报价单服务失败: {}", e)))?;

        let mut parts: HashMap<Uuid, Vec<EstimatePartLine>> = HashMap::new();
        for row in part_rows {
            parts
                .entry(row.orcamento_id)
                .or_default()
                .push(estimate_part_from_row(row));
        }

        let mut services: HashMap<Uuid, Vec<EstimateServiceLine>> = HashMap::new();
        for row in service_rows {
            services
                .entry(row.orcamento_id)
                .or_default()
                .push(estimate_service_from_row(row));
        }

        Ok(estimates
            .into_iter()
            .map(|row| {
                let id = row.id;
                let estimate = EstimateWithItems {
                    estimate: estimate_from_row(row),
                    parts: parts.remove(&id).unwrap_or_default(),
                    services: services.remove(&id).unwrap_or_default(),
                };
                (id, estimate)
            })
            .collect())
    }
}

#[async_trait]
impl ServiceOrderRepository for PostgresServiceOrderRepository {
    async fn list_with_details(&self) -> AppResult<Vec<ServiceOrderWithDetails>> {
        let rows = sqlx::query_as::<_, ServiceOrderDetailRow>(
            r#"
            SELECT os.id, os.cliente_id, os.veiculo_id, os.orcamento_id, os.status, os.status_servico,
                   os.descricao, os.observacoes, os.created_at, os.updated_at,
                   c.id AS c_id, c.nome AS c_nome, c.telefone AS c_telefone,
                   c.email AS c_email, c.documento AS c_documento,
                   v.id AS v_id, v.cliente_id AS v_cliente_id, v.marca AS v_marca,
                   v.modelo AS v_modelo, v.ano AS v_ano, v.placa AS v_placa, v.cor AS v_cor
            FROM ordem_servico os
            LEFT JOIN clientes c ON c.id = os.cliente_id
            LEFT JOIN veiculos v ON v.id = os.veiculo_id
            ORDER BY os.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询服务工单列表失败: {}", e)))?;

        let mut orders: Vec<ServiceOrderWithDetails> =
            rows.into_iter().map(service_order_details_from_row).collect();

        let mut estimate_ids: Vec<Uuid> = orders
            .iter()
            .filter_map(|details| details.order.estimate_id.map(|id| id.0))
            .collect();
        estimate_ids.sort_unstable();
        estimate_ids.dedup();

        let estimates = self.load_estimates(&estimate_ids).await?;
        for details in &mut orders {
            if let Some(estimate_id) = details.order.estimate_id {
                details.estimate = estimates.get(&estimate_id.0).cloned();
            }
        }

        Ok(orders)
    }

    async fn find_with_estimate_parts(
        &self,
        id: &ServiceOrderId,
    ) -> AppResult<Option<ServiceOrderSnapshot>> {
        let Some(order) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let estimate_parts = match order.estimate_id {
            Some(estimate_id) => sqlx::query_as::<_, PartQuantityRow>(
                "SELECT peca_id, quantidade FROM orcamento_pecas WHERE orcamento_id = $1",
            )
            .bind(estimate_id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("查询报价单配件失败: {}", e)))?
            .into_iter()
            .map(part_quantity_from_row)
            .collect(),
            None => Vec::new(),
        };

        Ok(Some(ServiceOrderSnapshot {
            order,
            estimate_parts,
        }))
    }

    async fn find_by_id(&self, id: &ServiceOrderId) -> AppResult<Option<ServiceOrder>> {
        let row = sqlx::query_as::<_, ServiceOrderRow>(&format!(
            "SELECT {} FROM ordem_servico WHERE id = $1",
            SERVICE_ORDER_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询服务工单失败: {}", e)))?;

        Ok(row.map(service_order_from_row))
    }

    async fn insert(&self, order: &NewServiceOrder) -> AppResult<ServiceOrder> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, ServiceOrderRow>(&format!(
            r#"
            INSERT INTO ordem_servico (
                id, cliente_id, veiculo_id, orcamento_id, status, status_servico,
                descricao, observacoes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            SERVICE_ORDER_COLUMNS
        ))
        .bind(ServiceOrderId::new().0)
        .bind(order.customer_id.0)
        .bind(order.vehicle_id.map(|id| id.0))
        .bind(order.estimate_id.map(|id| id.0))
        .bind(&order.status)
        .bind(order.service_status.as_ref().map(|s| s.as_str()))
        .bind(&order.description)
        .bind(&order.notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("新建服务工单失败: {}", e)))?;

        Ok(service_order_from_row(row))
    }

    async fn update(
        &self,
        id: &ServiceOrderId,
        patch: &ServiceOrderPatch,
    ) -> AppResult<ServiceOrder> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE ordem_servico SET ");
        let mut set = builder.separated(", ");

        if let Some(customer_id) = patch.customer_id {
            set.push("cliente_id = ").push_bind_unseparated(customer_id.0);
        }
        if let Some(vehicle_id) = patch.vehicle_id {
            set.push("veiculo_id = ")
                .push_bind_unseparated(vehicle_id.map(|id| id.0));
        }
        if let Some(estimate_id) = patch.estimate_id {
            set.push("orcamento_id = ")
                .push_bind_unseparated(estimate_id.map(|id| id.0));
        }
        if let Some(status) = &patch.status {
            set.push("status = ").push_bind_unseparated(status.clone());
        }
        if let Some(service_status) = &patch.service_status {
            set.push("status_servico = ")
                .push_bind_unseparated(service_status.as_ref().map(|s| s.as_str().to_string()));
        }
        if let Some(description) = &patch.description {
            set.push("descricao = ").push_bind_unseparated(description.clone());
        }
        if let Some(notes) = &patch.notes {
            set.push("observacoes = ").push_bind_unseparated(notes.clone());
        }
        set.push("updated_at = ").push_bind_unseparated(Utc::now());

        builder.push(" WHERE id = ");
        builder.push_bind(id.0);
        builder.push(" RETURNING ");
        builder.push(SERVICE_ORDER_COLUMNS);

        let row = builder
            .build_query_as::<ServiceOrderRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("更新服务工单失败: {}", e)))?
            .ok_or_else(|| AppError::not_found(format!("服务工单 {} 不存在", id)))?;

        Ok(service_order_from_row(row))
    }

    async fn delete(&self, id: &ServiceOrderId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM ordem_servico WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("删除服务工单失败: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("服务工单 {} 不存在", id)));
        }

        Ok(())
    }
}
