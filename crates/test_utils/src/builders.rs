//! Test Data Builders
//!
//! Builders for constructing test records with sensible defaults. Tests
//! specify only the relevant fields.

use core_kernel::{LocationId, VehicleId};
use domain_rental::{Location, Vehicle};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for vehicles
pub struct VehicleBuilder {
    vehicle: Vehicle,
}

impl Default for VehicleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleBuilder {
    /// Creates an available Honda Civic at location 30001
    pub fn new() -> Self {
        Self {
            vehicle: Vehicle {
                id: VehicleId::new("10000"),
                vin: Some("2HGFC2F59KH000000".to_string()),
                make: "Honda".to_string(),
                model: "Civic".to_string(),
                year: 2021,
                daily_price: dec!(39.99),
                available: true,
                location_id: Some(LocationId::new("30001")),
            },
        }
    }

    pub fn with_id(mut self, id: impl Into<VehicleId>) -> Self {
        self.vehicle.id = id.into();
        self
    }

    pub fn with_vin(mut self, vin: impl Into<String>) -> Self {
        self.vehicle.vin = Some(vin.into());
        self
    }

    pub fn with_make_model_year(mut self, make: &str, model: &str, year: i32) -> Self {
        self.vehicle.make = make.to_string();
        self.vehicle.model = model.to_string();
        self.vehicle.year = year;
        self
    }

    pub fn with_daily_price(mut self, price: Decimal) -> Self {
        self.vehicle.daily_price = price;
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.vehicle.available = available;
        self
    }

    pub fn at_location(mut self, location_id: impl Into<LocationId>) -> Self {
        self.vehicle.location_id = Some(location_id.into());
        self
    }

    pub fn build(self) -> Vehicle {
        self.vehicle
    }
}

/// Builder for locations
pub struct LocationBuilder {
    location: Location,
}

impl Default for LocationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationBuilder {
    pub fn new() -> Self {
        Self {
            location: Location {
                id: LocationId::new("30001"),
                postal_code: "02139".to_string(),
                address: "1 Broadway".to_string(),
                city: "Cambridge".to_string(),
                state: "MA".to_string(),
                available_vehicles: 3,
            },
        }
    }

    pub fn with_id(mut self, id: impl Into<LocationId>) -> Self {
        self.location.id = id.into();
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.location.postal_code = postal_code.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.location.address = address.into();
        self
    }

    pub fn with_available_vehicles(mut self, count: u32) -> Self {
        self.location.available_vehicles = count;
        self
    }

    pub fn build(self) -> Location {
        self.location
    }
}
