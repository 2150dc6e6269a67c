//! Rental domain services
//!
//! These services orchestrate calls against the CRM port. Each one backs a
//! server function; none of them retries, caches, or rolls back.

use std::sync::Arc;

use tracing::{error, info, warn};

use core_kernel::{LocationId, OperationMetadata, RentalAgreementId};

use crate::error::RentalError;
use crate::location::Location;
use crate::ports::{CrmPort, LocationQuery, SearchPage, VehicleQuery};
use crate::rental::{NewRentalAgreement, RentalRequest};
use crate::vehicle::Vehicle;

/// Finds the vehicles that can be rented at a location
pub struct VehicleSearchService {
    crm: Arc<dyn CrmPort>,
}

impl VehicleSearchService {
    pub fn new(crm: Arc<dyn CrmPort>) -> Self {
        Self { crm }
    }

    /// Returns the first page (up to 100) of available vehicles at the location
    pub async fn available_at(
        &self,
        location_id: &LocationId,
        metadata: Option<OperationMetadata>,
    ) -> Result<SearchPage<Vehicle>, RentalError> {
        info!(location_id = %location_id, "Fetching vehicles for location");

        let page = self
            .crm
            .search_vehicles(VehicleQuery::available_at(location_id.clone()), metadata)
            .await?;

        info!(
            location_id = %location_id,
            returned = page.results.len(),
            total = page.total,
            "Vehicles found"
        );
        Ok(page)
    }
}

/// Finds rental locations by postal code
pub struct LocationSearchService {
    crm: Arc<dyn CrmPort>,
}

impl LocationSearchService {
    pub fn new(crm: Arc<dyn CrmPort>) -> Self {
        Self { crm }
    }

    pub async fn by_postal_code(
        &self,
        postal_code: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<SearchPage<Location>, RentalError> {
        let postal_code = postal_code.trim();
        if postal_code.is_empty() {
            return Err(RentalError::invalid_request("zip code must not be empty"));
        }

        info!(postal_code, "Fetching locations");
        let page = self
            .crm
            .search_locations(LocationQuery::by_postal_code(postal_code), metadata)
            .await?;
        info!(postal_code, total = page.total, "Locations found");
        Ok(page)
    }
}

/// Creates rental agreements and marks the rented vehicle unavailable
///
/// The sequence is:
/// 1. Read the vehicle (price, make, model, year)
/// 2. Read the contact (first and last name)
/// 3. Compute total days and the display name
/// 4. Create the agreement with associations to contact and vehicle
/// 5. Patch the vehicle's availability flag to false
///
/// Each step starts only after the previous one succeeded. A failure in
/// step 5 leaves the agreement in place; the error names it so callers can
/// reconcile by hand.
pub struct RentalAgreementCreator {
    crm: Arc<dyn CrmPort>,
}

impl RentalAgreementCreator {
    pub fn new(crm: Arc<dyn CrmPort>) -> Self {
        Self { crm }
    }

    /// Runs the creation sequence and returns the new agreement's id
    pub async fn create(
        &self,
        request: RentalRequest,
        metadata: Option<OperationMetadata>,
    ) -> Result<RentalAgreementId, RentalError> {
        info!(
            vehicle_id = %request.vehicle_id,
            contact_id = %request.contact_id,
            start_date = %request.period.start,
            end_date = %request.period.end,
            insurance = request.insurance,
            "Creating rental agreement"
        );

        let vehicle = self.crm.get_vehicle(&request.vehicle_id, metadata.clone()).await?;
        let contact = self.crm.get_contact(&request.contact_id, metadata.clone()).await?;

        if !vehicle.available {
            warn!(vehicle_id = %vehicle.id, "Vehicle is already marked unavailable");
        }

        let draft = NewRentalAgreement::draft(&vehicle, &contact, request.period, request.insurance);
        let rental_id = self
            .crm
            .create_rental_agreement(draft, metadata.clone())
            .await?;

        if let Err(source) = self
            .crm
            .set_vehicle_availability(&request.vehicle_id, false, metadata)
            .await
        {
            error!(
                rental_id = %rental_id,
                vehicle_id = %request.vehicle_id,
                error = %source,
                transient = source.is_transient(),
                "Rental agreement created but vehicle availability was not updated"
            );
            return Err(RentalError::AvailabilityNotUpdated {
                rental_id,
                vehicle_id: request.vehicle_id,
                source,
            });
        }

        info!(rental_id = %rental_id, "Rental agreement created");
        Ok(rental_id)
    }
}
