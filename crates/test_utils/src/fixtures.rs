//! Pre-built Test Fixtures
//!
//! Ready-to-use records for the rental domain. The values match the
//! examples used throughout the test suite.

use chrono::NaiveDate;
use core_kernel::{ContactId, LocationId, RentalPeriod, VehicleId};
use domain_rental::{Contact, Location, MockCrmPort, Vehicle};
use rust_decimal_macros::dec;

use crate::builders::{LocationBuilder, VehicleBuilder};

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn vehicle_id() -> VehicleId {
        VehicleId::new("10001")
    }

    pub fn contact_id() -> ContactId {
        ContactId::new("20001")
    }

    pub fn location_id() -> LocationId {
        LocationId::new("30001")
    }
}

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    pub fn jan_1_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    pub fn jan_5_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    /// 2024-01-01 to 2024-01-05, four days
    pub fn four_day_period() -> RentalPeriod {
        RentalPeriod::new(Self::jan_1_2024(), Self::jan_5_2024()).unwrap()
    }
}

/// Fixture for domain records
pub struct RecordFixtures;

impl RecordFixtures {
    /// Available 2022 Toyota Camry at the default location, $45.00/day
    pub fn camry() -> Vehicle {
        VehicleBuilder::new()
            .with_id(IdFixtures::vehicle_id())
            .with_make_model_year("Toyota", "Camry", 2022)
            .with_daily_price(dec!(45.00))
            .build()
    }

    pub fn jane_doe() -> Contact {
        Contact {
            id: IdFixtures::contact_id(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
        }
    }

    pub fn downtown() -> Location {
        LocationBuilder::new().with_id(IdFixtures::location_id()).build()
    }

    /// `count` locations sharing one postal code
    pub fn locations(count: usize, postal_code: &str) -> Vec<Location> {
        (0..count)
            .map(|i| {
                LocationBuilder::new()
                    .with_id(LocationId::new(format!("loc-{:03}", i)))
                    .with_postal_code(postal_code)
                    .with_address(format!("{} Main St", 100 + i))
                    .build()
            })
            .collect()
    }
}

/// A mock CRM seeded with the Camry, Jane Doe and the downtown location
pub async fn seeded_crm() -> MockCrmPort {
    let crm = MockCrmPort::new();
    crm.insert_vehicle(RecordFixtures::camry()).await;
    crm.insert_contact(RecordFixtures::jane_doe()).await;
    crm.insert_location(RecordFixtures::downtown()).await;
    crm
}
