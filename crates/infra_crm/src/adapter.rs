//! REST adapter implementing the rental domain's CrmPort
//!
//! Translates port calls into object API requests against the custom object
//! types configured in [`CrmSchema`](crate::config::CrmSchema).

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use core_kernel::{
    AdapterHealth, ContactId, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata,
    PortError, RentalAgreementId, VehicleId,
};
use domain_rental::contact::CONTACT_READ_PROPERTIES;
use domain_rental::location::LOCATION_SEARCH_PROPERTIES;
use domain_rental::vehicle::{VEHICLE_READ_PROPERTIES, VEHICLE_SEARCH_PROPERTIES};
use domain_rental::{
    Contact, CrmPort, Location, LocationQuery, NewRentalAgreement, SearchPage, Vehicle,
    VehicleQuery,
};

use crate::client::CrmClient;
use crate::dto::{CrmObject, Filter, PatchObjectRequest, SearchRequest};
use crate::mapping::{
    bool_property, contact_from_object, location_from_object, rental_create_request,
    vehicle_from_object,
};

/// `CrmPort` backed by the CRM REST API
#[derive(Debug, Clone)]
pub struct CrmRestAdapter {
    client: CrmClient,
}

impl CrmRestAdapter {
    pub fn new(client: CrmClient) -> Self {
        Self { client }
    }

    fn schema(&self) -> &crate::config::CrmSchema {
        &self.client.config().schema
    }
}

fn correlation(metadata: &Option<OperationMetadata>) -> &str {
    metadata
        .as_ref()
        .and_then(|m| m.correlation_id.as_deref())
        .unwrap_or("-")
}

/// Maps search hits, dropping records whose properties cannot be decoded
fn map_hits<T>(
    objects: &[CrmObject],
    map: impl Fn(&CrmObject) -> Result<T, PortError>,
    correlation_id: &str,
) -> Vec<T> {
    objects
        .iter()
        .filter_map(|object| match map(object) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(
                    correlation_id,
                    object_id = %object.id,
                    error = %e,
                    "Skipping search hit that could not be mapped"
                );
                None
            }
        })
        .collect()
}

impl DomainPort for CrmRestAdapter {}

#[async_trait]
impl HealthCheckable for CrmRestAdapter {
    /// Runs a one-result vehicle search to verify the token and connectivity
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let probe = SearchRequest::matching_all(vec![], &["hs_object_id"], 1, 0);
        let result = self
            .client
            .search_objects(&self.schema().vehicle_object_type, &probe)
            .await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e @ PortError::RateLimited { .. }) => (AdapterHealth::Degraded, Some(e.to_string())),
            Err(e) => (AdapterHealth::Unhealthy, Some(e.to_string())),
        };

        HealthCheckResult {
            adapter_id: "crm-rest-adapter".to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl CrmPort for CrmRestAdapter {
    async fn get_vehicle(
        &self,
        id: &VehicleId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vehicle, PortError> {
        debug!(vehicle_id = %id, correlation_id = correlation(&metadata), "Reading vehicle");
        let object = self
            .client
            .get_object(&self.schema().vehicle_object_type, id.as_str(), VEHICLE_READ_PROPERTIES)
            .await?;
        vehicle_from_object(&object)
    }

    async fn get_contact(
        &self,
        id: &ContactId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Contact, PortError> {
        debug!(contact_id = %id, correlation_id = correlation(&metadata), "Reading contact");
        let object = self
            .client
            .get_object(&self.schema().contact_object_type, id.as_str(), CONTACT_READ_PROPERTIES)
            .await?;
        Ok(contact_from_object(&object))
    }

    async fn search_vehicles(
        &self,
        query: VehicleQuery,
        metadata: Option<OperationMetadata>,
    ) -> Result<SearchPage<Vehicle>, PortError> {
        let mut filters = Vec::new();
        if let Some(location_id) = &query.location_id {
            filters.push(Filter::eq("location", location_id.as_str()));
        }
        if let Some(available) = query.available {
            filters.push(Filter::eq("available", bool_property(available)));
        }
        let request =
            SearchRequest::matching_all(filters, VEHICLE_SEARCH_PROPERTIES, query.limit, query.after);

        debug!(correlation_id = correlation(&metadata), ?request, "Searching vehicles");
        let response = self
            .client
            .search_objects(&self.schema().vehicle_object_type, &request)
            .await?;

        let mut results = map_hits(&response.results, vehicle_from_object, correlation(&metadata));
        // The search projection omits `location`; every hit matched the filter
        if let Some(location_id) = &query.location_id {
            for vehicle in &mut results {
                vehicle.location_id.get_or_insert_with(|| location_id.clone());
            }
        }

        Ok(SearchPage {
            results,
            total: response.total,
        })
    }

    async fn search_locations(
        &self,
        query: LocationQuery,
        metadata: Option<OperationMetadata>,
    ) -> Result<SearchPage<Location>, PortError> {
        let request = SearchRequest::matching_all(
            vec![Filter::eq("postal_code", query.postal_code.as_str())],
            LOCATION_SEARCH_PROPERTIES,
            query.limit,
            query.after,
        );

        debug!(correlation_id = correlation(&metadata), ?request, "Searching locations");
        let response = self
            .client
            .search_objects(&self.schema().location_object_type, &request)
            .await?;

        let results = map_hits(&response.results, location_from_object, correlation(&metadata));

        Ok(SearchPage {
            results,
            total: response.total,
        })
    }

    async fn create_rental_agreement(
        &self,
        agreement: NewRentalAgreement,
        metadata: Option<OperationMetadata>,
    ) -> Result<RentalAgreementId, PortError> {
        let request = rental_create_request(&agreement, self.schema());
        let created = self
            .client
            .create_object(&self.schema().rental_object_type, &request)
            .await?;

        info!(
            rental_id = %created.id,
            correlation_id = correlation(&metadata),
            "Rental agreement object created"
        );
        Ok(RentalAgreementId::new(created.id))
    }

    async fn set_vehicle_availability(
        &self,
        id: &VehicleId,
        available: bool,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        let request = PatchObjectRequest::single("available", bool_property(available));
        self.client
            .patch_object(&self.schema().vehicle_object_type, id.as_str(), &request)
            .await?;

        info!(
            vehicle_id = %id,
            available,
            correlation_id = correlation(&metadata),
            "Vehicle availability updated"
        );
        Ok(())
    }
}
