//! Server function contract
//!
//! The presentation layer invokes server functions by name with a parameter
//! object. Every function answers with either its payload or `{"error": ...}`;
//! failures are never surfaced any other way.

use serde::{Deserialize, Serialize};

use core_kernel::{ContactId, DateInput, LocationId, RentalAgreementId, RentalPeriod, VehicleId};

use crate::error::RentalError;
use crate::location::Location;
use crate::ports::SearchPage;
use crate::rental::RentalRequest;
use crate::vehicle::Vehicle;

pub const GET_VEHICLES_FOR_LOCATION: &str = "getVehiclesForLocation";
pub const CREATE_RENTAL_AGREEMENT: &str = "createRentalAgreement";
pub const GET_LOCATIONS: &str = "getLocations";

/// Parameters of `getVehiclesForLocation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVehiclesForLocationParams {
    pub location_id: LocationId,
}

/// Parameters of `getLocations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLocationsParams {
    pub zip_code: String,
}

/// Parameters of `createRentalAgreement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalAgreementParams {
    pub vehicle_id: VehicleId,
    pub contact_id: ContactId,
    pub start_date: DateInput,
    pub end_date: DateInput,
    #[serde(default)]
    pub insurance: bool,
}

impl CreateRentalAgreementParams {
    /// Validates ids and dates into a rental request
    pub fn into_request(self) -> Result<RentalRequest, RentalError> {
        if self.vehicle_id.as_str().trim().is_empty() {
            return Err(RentalError::invalid_request("vehicleId must not be empty"));
        }
        if self.contact_id.as_str().trim().is_empty() {
            return Err(RentalError::invalid_request("contactId must not be empty"));
        }
        let period = RentalPeriod::from_inputs(&self.start_date, &self.end_date)?;

        Ok(RentalRequest {
            vehicle_id: self.vehicle_id,
            contact_id: self.contact_id,
            period,
            insurance: self.insurance,
        })
    }
}

/// Payload of `getVehiclesForLocation`
pub type VehicleResults = SearchPage<Vehicle>;

/// Payload of `getLocations`
pub type LocationResults = SearchPage<Location>;

/// Payload of `createRentalAgreement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalCreated {
    pub success: bool,
    pub rental_agreement_id: RentalAgreementId,
}

impl RentalCreated {
    pub fn new(rental_agreement_id: RentalAgreementId) -> Self {
        Self {
            success: true,
            rental_agreement_id,
        }
    }
}

/// A server function's answer: its payload or an error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionResponse<T> {
    Failed { error: String },
    Ok(T),
}

impl<T> FunctionResponse<T> {
    pub fn failed(message: impl Into<String>) -> Self {
        FunctionResponse::Failed { error: message.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FunctionResponse::Failed { .. })
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            FunctionResponse::Ok(value) => Ok(value),
            FunctionResponse::Failed { error } => Err(error),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for FunctionResponse<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => FunctionResponse::Ok(value),
            Err(e) => FunctionResponse::failed(e.to_string()),
        }
    }
}
