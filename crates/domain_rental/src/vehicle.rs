//! Vehicle records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{LocationId, VehicleId};

/// Properties requested when searching vehicles at a location
pub const VEHICLE_SEARCH_PROPERTIES: &[&str] = &[
    "vin",
    "make",
    "model",
    "year",
    "available",
    "hs_object_id",
    "daily_price",
];

/// Properties requested when reading a single vehicle
pub const VEHICLE_READ_PROPERTIES: &[&str] = &[
    "make",
    "model",
    "year",
    "daily_price",
    "available",
    "vin",
    "location",
];

/// A rentable vehicle stored in the CRM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub daily_price: Decimal,
    pub available: bool,
    /// Not part of the search projection, so only set on direct reads
    pub location_id: Option<LocationId>,
}

impl Vehicle {
    /// "Make Model Year", as shown in the vehicle picker
    pub fn label(&self) -> String {
        format!("{} {} {}", self.make, self.model, self.year)
    }

    /// Daily rate formatted for display
    pub fn price_label(&self) -> String {
        format!("${}", self.daily_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camry() -> Vehicle {
        Vehicle {
            id: VehicleId::new("10"),
            vin: Some("4T1B11HK5KU000001".to_string()),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2022,
            daily_price: Decimal::new(5900, 2),
            available: true,
            location_id: None,
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(camry().label(), "Toyota Camry 2022");
    }

    #[test]
    fn test_price_label() {
        assert_eq!(camry().price_label(), "$59.00");
    }

    #[test]
    fn test_search_projection_has_internal_id() {
        assert!(VEHICLE_SEARCH_PROPERTIES.contains(&"hs_object_id"));
        assert_eq!(VEHICLE_SEARCH_PROPERTIES.len(), 7);
    }
}
