//! Rental locations (read-only)

use serde::{Deserialize, Serialize};

use core_kernel::LocationId;

/// Properties requested when searching locations
pub const LOCATION_SEARCH_PROPERTIES: &[&str] = &[
    "postal_code",
    "address_1",
    "city",
    "state",
    "number_of_available_vehicles",
];

/// A branch where vehicles are picked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: LocationId,
    pub postal_code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub available_vehicles: u32,
}

impl Location {
    /// "address city, state", as shown in the location table
    pub fn address_line(&self) -> String {
        format!("{} {}, {}", self.address, self.city, self.state)
    }
}
