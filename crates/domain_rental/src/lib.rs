//! Rental Domain
//!
//! This crate holds the car-rental records the extension works with and the
//! services behind its server functions. The CRM is the system of record:
//! every read and write goes through the [`CrmPort`] trait.
//!
//! # Rental Creation Flow
//!
//! ```text
//! read vehicle -> read contact -> compute days/name -> create agreement -> mark vehicle unavailable
//! ```
//!
//! The steps run strictly in sequence and nothing is rolled back. If the
//! final availability patch fails the agreement stays in the CRM while the
//! vehicle is still listed as available.
//!
//! # Examples
//!
//! ```rust
//! use domain_rental::rental::display_name;
//! use domain_rental::{Contact, Vehicle};
//! use core_kernel::{ContactId, VehicleId};
//! use rust_decimal::Decimal;
//!
//! let vehicle = Vehicle {
//!     id: VehicleId::new("1"),
//!     vin: None,
//!     make: "Toyota".to_string(),
//!     model: "Camry".to_string(),
//!     year: 2022,
//!     daily_price: Decimal::new(4999, 2),
//!     available: true,
//!     location_id: None,
//! };
//! let contact = Contact {
//!     id: ContactId::new("2"),
//!     first_name: Some("Jane".to_string()),
//!     last_name: Some("Doe".to_string()),
//! };
//!
//! assert_eq!(display_name(&vehicle, &contact), "Toyota Camry 2022 - Jane Doe");
//! ```

pub mod vehicle;
pub mod contact;
pub mod location;
pub mod rental;
pub mod error;
pub mod ports;
pub mod services;
pub mod functions;

pub use vehicle::Vehicle;
pub use contact::Contact;
pub use location::Location;
pub use rental::{RentalAgreement, RentalRequest, NewRentalAgreement};
pub use error::RentalError;
pub use ports::{CrmPort, VehicleQuery, LocationQuery, SearchPage, MAX_SEARCH_LIMIT};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockCrmPort, MockOperation};
pub use services::{VehicleSearchService, RentalAgreementCreator, LocationSearchService};
