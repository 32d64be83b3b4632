//! 车辆（veiculos）

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CustomerId, VehicleId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub customer_id: Option<CustomerId>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub plate: Option<String>,
    pub color: Option<String>,
}

impl Vehicle {
    /// 展示用描述，如 "Fiat Uno (ABC1D23)"
    pub fn display_name(&self) -> String {
        let name = [self.brand.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        match (&self.plate, name.is_empty()) {
            (Some(plate), false) => format!("{} ({})", name, plate),
            (Some(plate), true) => plate.clone(),
            (None, _) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(brand: Option<&str>, model: Option<&str>, plate: Option<&str>) -> Vehicle {
        Vehicle {
            id: VehicleId::new(),
            customer_id: None,
            brand: brand.map(str::to_string),
            model: model.map(str::to_string),
            year: None,
            plate: plate.map(str::to_string),
            color: None,
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(
            vehicle(Some("Fiat"), Some("Uno"), Some("ABC1D23")).display_name(),
            "Fiat Uno (ABC1D23)"
        );
        assert_eq!(vehicle(None, None, Some("ABC1D23")).display_name(), "ABC1D23");
        assert_eq!(vehicle(Some("VW"), Some("Gol"), None).display_name(), "VW Gol");
    }
}
