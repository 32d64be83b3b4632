//! 面向用户的通知文案

pub const ORDER_CREATED: &str = "Ordem de serviço criada com sucesso!";
pub const ORDER_CREATE_FAILED: &str = "Erro ao criar ordem de serviço";

pub const ORDER_UPDATED: &str = "Ordem de serviço atualizada com sucesso!";
pub const ORDER_UPDATE_FAILED: &str = "Erro ao atualizar ordem de serviço";

pub const ORDER_DELETED: &str = "Ordem de serviço excluída com sucesso!";
pub const ORDER_DELETE_FAILED: &str = "Erro ao excluir ordem de serviço";
