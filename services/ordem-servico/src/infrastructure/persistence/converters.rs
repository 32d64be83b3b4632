//! 数据库行与领域对象的转换

use crate::domain::{
    Customer, CustomerId, Estimate, EstimateId, EstimatePartLine, EstimateServiceLine,
    EstimateStatus, Part, PartId, PartQuantity, Service, ServiceId, ServiceOrder, ServiceOrderId,
    ServiceOrderWithDetails, ServiceStatus, Vehicle, VehicleId,
};

use super::rows::{
    EstimatePartRow, EstimateRow, EstimateServiceRow, PartQuantityRow, ServiceOrderDetailRow,
    ServiceOrderRow, VehicleRow,
};

pub fn service_order_from_row(row: ServiceOrderRow) -> ServiceOrder {
    ServiceOrder {
        id: ServiceOrderId::from_uuid(row.id),
        customer_id: CustomerId::from_uuid(row.cliente_id),
        vehicle_id: row.veiculo_id.map(VehicleId::from_uuid),
        estimate_id: row.orcamento_id.map(EstimateId::from_uuid),
        status: row.status,
        service_status: row.status_servico.map(ServiceStatus::from),
        description: row.descricao,
        notes: row.observacoes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// 联表行转为详情视图（不含报价单）
pub fn service_order_details_from_row(row: ServiceOrderDetailRow) -> ServiceOrderWithDetails {
    let customer = row.c_id.map(|id| Customer {
        id: CustomerId::from_uuid(id),
        name: row.c_nome.unwrap_or_default(),
        phone: row.c_telefone,
        email: row.c_email,
        document: row.c_documento,
    });

    let vehicle = row.v_id.map(|id| Vehicle {
        id: VehicleId::from_uuid(id),
        customer_id: row.v_cliente_id.map(CustomerId::from_uuid),
        brand: row.v_marca,
        model: row.v_modelo,
        year: row.v_ano,
        plate: row.v_placa,
        color: row.v_cor,
    });

    let mut details = ServiceOrderWithDetails::new(service_order_from_row(row.order));
    details.customer = customer;
    details.vehicle = vehicle;
    details
}

pub fn vehicle_from_row(row: VehicleRow) -> Vehicle {
    Vehicle {
        id: VehicleId::from_uuid(row.id),
        customer_id: row.cliente_id.map(CustomerId::from_uuid),
        brand: row.marca,
        model: row.modelo,
        year: row.ano,
        plate: row.placa,
        color: row.cor,
    }
}

pub fn estimate_from_row(row: EstimateRow) -> Estimate {
    Estimate {
        id: EstimateId::from_uuid(row.id),
        customer_id: row.cliente_id.map(CustomerId::from_uuid),
        vehicle_id: row.veiculo_id.map(VehicleId::from_uuid),
        status: EstimateStatus::from(row.status),
        total: row.valor_total,
        created_at: row.created_at,
    }
}

pub fn estimate_part_from_row(row: EstimatePartRow) -> EstimatePartLine {
    let part = row.p_id.map(|id| Part {
        id: PartId::from_uuid(id),
        name: row.p_nome.unwrap_or_default(),
        code: row.p_codigo,
        price: row.p_preco,
        stock_quantity: row.p_quantidade_estoque.unwrap_or_default(),
    });

    EstimatePartLine {
        id: row.id,
        part_id: PartId::from_uuid(row.peca_id),
        quantity: row.quantidade,
        unit_price: row.valor_unitario,
        part,
    }
}

pub fn estimate_service_from_row(row: EstimateServiceRow) -> EstimateServiceLine {
    let service = row.s_id.map(|id| Service {
        id: ServiceId::from_uuid(id),
        name: row.s_nome.unwrap_or_default(),
        description: row.s_descricao,
        price: row.s_valor,
    });

    EstimateServiceLine {
        id: row.id,
        service_id: ServiceId::from_uuid(row.servico_id),
        quantity: row.quantidade,
        price: row.valor,
        service,
    }
}

pub fn part_quantity_from_row(row: PartQuantityRow) -> PartQuantity {
    PartQuantity::new(PartId::from_uuid(row.peca_id), row.quantidade)
}
