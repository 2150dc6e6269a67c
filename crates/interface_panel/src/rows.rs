//! Table rows as the card displays them

use domain_rental::{Location, Vehicle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRow {
    pub id: String,
    pub postal_code: String,
    /// `"{address_1} {city}, {state}"`
    pub address: String,
    pub available_vehicles: u32,
}

impl From<&Location> for LocationRow {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.to_string(),
            postal_code: location.postal_code.clone(),
            address: location.address_line(),
            available_vehicles: location.available_vehicles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRow {
    pub id: String,
    pub vin: String,
    /// `"{make} {model} {year}"`
    pub description: String,
    /// `"${daily_price}"`
    pub daily_rate: String,
}

impl From<&Vehicle> for VehicleRow {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.to_string(),
            vin: vehicle.vin.clone().unwrap_or_default(),
            description: vehicle.label(),
            daily_rate: vehicle.price_label(),
        }
    }
}
