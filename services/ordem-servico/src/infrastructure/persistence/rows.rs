//! 数据库行映射结构

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// 工单列
pub(super) const SERVICE_ORDER_COLUMNS: &str = "id, cliente_id, veiculo_id, orcamento_id, status, status_servico, \
     descricao, observacoes, created_at, updated_at";

/// 工单数据库行
#[derive(Debug, FromRow)]
pub struct ServiceOrderRow {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub veiculo_id: Option<Uuid>,
    pub orcamento_id: Option<Uuid>,
    pub status: String,
    pub status_servico: Option<String>,
    pub descricao: Option<String>,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 工单 + 客户 + 车辆联表行
#[derive(Debug, FromRow)]
pub struct ServiceOrderDetailRow {
    #[sqlx(flatten)]
    pub order: ServiceOrderRow,
    pub c_id: Option<Uuid>,
    pub c_nome: Option<String>,
    pub c_telefone: Option<String>,
    pub c_email: Option<String>,
    pub c_documento: Option<String>,
    pub v_id: Option<Uuid>,
    pub v_cliente_id: Option<Uuid>,
    pub v_marca: Option<String>,
    pub v_modelo: Option<String>,
    pub v_ano: Option<i32>,
    pub v_placa: Option<String>,
    pub v_cor: Option<String>,
}

/// 车辆数据库行
#[derive(Debug, FromRow)]
pub struct VehicleRow {
    pub id: Uuid,
    pub cliente_id: Option<Uuid>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub ano: Option<i32>,
    pub placa: Option<String>,
    pub cor: Option<String>,
}

/// 报价单数据库行
#[derive(Debug, FromRow)]
pub struct EstimateRow {
    pub id: Uuid,
    pub cliente_id: Option<Uuid>,
    pub veiculo_id: Option<Uuid>,
    pub status: String,
    pub valor_total: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// 报价单配件行（联 pecas）
#[derive(Debug, FromRow)]
pub struct EstimatePartRow {
    pub id: Uuid,
    pub orcamento_id: Uuid,
    pub peca_id: Uuid,
    pub quantidade: i32,
    pub valor_unitario: Option<Decimal>,
    pub p_id: Option<Uuid>,
    pub p_nome: Option<String>,
    pub p_codigo: Option<String>,
    pub p_preco: Option<Decimal>,
    pub p_quantidade_estoque: Option<i32>,
}

/// 报价单服务行（联 servicos）
#[derive(Debug, FromRow)]
pub struct EstimateServiceRow {
    pub id: Uuid,
    pub orcamento_id: Uuid,
    pub servico_id: Uuid,
    pub quantidade: i32,
    pub valor: Option<Decimal>,
    pub s_id: Option<Uuid>,
    pub s_nome: Option<String>,
    pub s_descricao: Option<String>,
    pub s_valor: Option<Decimal>,
}

/// 配件数量行
#[derive(Debug, FromRow)]
pub struct PartQuantityRow {
    pub peca_id: Uuid,
    pub quantidade: i32,
}
