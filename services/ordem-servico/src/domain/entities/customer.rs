//! 客户（clientes）

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CustomerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// CPF / CNPJ
    pub document: Option<String>,
}
