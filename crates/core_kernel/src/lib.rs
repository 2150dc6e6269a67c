//! Core Kernel - Foundational types for the rental cars extension
//!
//! This crate provides the building blocks shared by every other crate:
//! - Opaque identifiers for CRM objects
//! - Rental periods and CRM date-input decoding
//! - Port error types and adapter marker traits

pub mod identifiers;
pub mod temporal;
pub mod ports;

pub use identifiers::{VehicleId, ContactId, LocationId, RentalAgreementId};
pub use temporal::{RentalPeriod, DateInput, TemporalError};
pub use ports::{
    PortError, DomainPort, OperationMetadata,
    HealthCheckable, HealthCheckResult, AdapterHealth,
};
