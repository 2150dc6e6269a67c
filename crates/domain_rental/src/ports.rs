//! Rental Domain Ports
//!
//! This module defines the port the rental services need from the CRM,
//! enabling swappable implementations (REST adapter, in-memory mock).
//!
//! # Architecture
//!
//! - **REST Adapter**: `infra_crm::CrmRestAdapter` calls the CRM object API
//! - **Mock Adapter**: [`mock::MockCrmPort`] keeps objects in memory for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_rental::{CrmPort, VehicleSearchService};
//! use std::sync::Arc;
//!
//! let crm: Arc<dyn CrmPort> = Arc::new(CrmRestAdapter::new(client));
//! let search = VehicleSearchService::new(crm.clone());
//! ```
//!
//! No optimistic concurrency control is applied. Two callers renting the same
//! vehicle at once will both succeed and both patch availability to false.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{
    ContactId, DomainPort, HealthCheckable, LocationId, OperationMetadata, PortError,
    RentalAgreementId, VehicleId,
};

use crate::contact::Contact;
use crate::location::Location;
use crate::rental::NewRentalAgreement;
use crate::vehicle::Vehicle;

/// Largest page the CRM search endpoint returns; only the first page is ever read
pub const MAX_SEARCH_LIMIT: u32 = 100;

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage<T> {
    pub results: Vec<T>,
    /// Total matches reported by the CRM, which may exceed `results.len()`
    pub total: u64,
}

impl<T> SearchPage<T> {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total: 0,
        }
    }
}

/// Query parameters for searching vehicles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleQuery {
    /// Filter by location reference
    pub location_id: Option<LocationId>,
    /// Filter by availability flag
    pub available: Option<bool>,
    pub limit: u32,
    /// Offset of the first result
    pub after: u32,
}

impl VehicleQuery {
    /// Vehicles at a location whose availability flag is true
    pub fn available_at(location_id: LocationId) -> Self {
        Self {
            location_id: Some(location_id),
            available: Some(true),
            limit: MAX_SEARCH_LIMIT,
            after: 0,
        }
    }
}

/// Query parameters for searching locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub postal_code: String,
    pub limit: u32,
    pub after: u32,
}

impl LocationQuery {
    pub fn by_postal_code(postal_code: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
            limit: MAX_SEARCH_LIMIT,
            after: 0,
        }
    }
}

/// Operations the rental services require from the CRM
///
/// All methods are async and return `Result<T, PortError>` so the mock and
/// REST adapters fail the same way.
#[async_trait]
pub trait CrmPort: DomainPort + HealthCheckable {
    /// Reads a vehicle with the price and naming properties
    async fn get_vehicle(
        &self,
        id: &VehicleId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vehicle, PortError>;

    /// Reads a contact's name properties
    async fn get_contact(
        &self,
        id: &ContactId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Contact, PortError>;

    /// Searches vehicles; returns a single page
    async fn search_vehicles(
        &self,
        query: VehicleQuery,
        metadata: Option<OperationMetadata>,
    ) -> Result<SearchPage<Vehicle>, PortError>;

    /// Searches locations; returns a single page
    async fn search_locations(
        &self,
        query: LocationQuery,
        metadata: Option<OperationMetadata>,
    ) -> Result<SearchPage<Location>, PortError>;

    /// Creates a rental agreement associated with its contact and vehicle
    async fn create_rental_agreement(
        &self,
        agreement: NewRentalAgreement,
        metadata: Option<OperationMetadata>,
    ) -> Result<RentalAgreementId, PortError>;

    /// Overwrites the vehicle's availability flag
    async fn set_vehicle_availability(
        &self,
        id: &VehicleId,
        available: bool,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;
}

/// Mock implementation of CrmPort for testing
///
/// Stores CRM objects in memory, records every call in order, and can be told
/// to fail specific operations.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult};
    use crate::rental::RentalAgreement;

    /// Operations of the port, used for failure injection and call logs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum MockOperation {
        GetVehicle,
        GetContact,
        SearchVehicles,
        SearchLocations,
        CreateRentalAgreement,
        SetVehicleAvailability,
    }

    #[derive(Debug, Default)]
    struct MockState {
        vehicles: HashMap<VehicleId, Vehicle>,
        contacts: HashMap<ContactId, Contact>,
        locations: Vec<Location>,
        rentals: Vec<RentalAgreement>,
        failing: HashSet<MockOperation>,
        calls: Vec<MockOperation>,
        next_rental_id: u64,
    }

    /// In-memory mock implementation of CrmPort
    #[derive(Debug, Clone, Default)]
    pub struct MockCrmPort {
        state: Arc<RwLock<MockState>>,
    }

    impl MockCrmPort {
        /// Creates a new empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn insert_vehicle(&self, vehicle: Vehicle) {
            self.state.write().await.vehicles.insert(vehicle.id.clone(), vehicle);
        }

        pub async fn insert_contact(&self, contact: Contact) {
            self.state.write().await.contacts.insert(contact.id.clone(), contact);
        }

        pub async fn insert_location(&self, location: Location) {
            self.state.write().await.locations.push(location);
        }

        /// Makes every later call to `operation` fail with a connection error
        pub async fn fail_on(&self, operation: MockOperation) {
            self.state.write().await.failing.insert(operation);
        }

        /// Calls made so far, in order
        pub async fn calls(&self) -> Vec<MockOperation> {
            self.state.read().await.calls.clone()
        }

        /// Agreements created so far
        pub async fn rental_agreements(&self) -> Vec<RentalAgreement> {
            self.state.read().await.rentals.clone()
        }

        pub async fn vehicle(&self, id: &VehicleId) -> Option<Vehicle> {
            self.state.read().await.vehicles.get(id).cloned()
        }

        async fn enter(&self, operation: MockOperation) -> Result<(), PortError> {
            let mut state = self.state.write().await;
            state.calls.push(operation);
            if state.failing.contains(&operation) {
                return Err(PortError::connection(format!("injected failure for {:?}", operation)));
            }
            Ok(())
        }
    }

    impl DomainPort for MockCrmPort {}

    #[async_trait]
    impl HealthCheckable for MockCrmPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-crm-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl CrmPort for MockCrmPort {
        async fn get_vehicle(
            &self,
            id: &VehicleId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vehicle, PortError> {
            self.enter(MockOperation::GetVehicle).await?;
            self.state
                .read()
                .await
                .vehicles
                .get(id)
                .cloned()
                .ok_or_else(|| PortError::not_found(VehicleId::entity(), id))
        }

        async fn get_contact(
            &self,
            id: &ContactId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Contact, PortError> {
            self.enter(MockOperation::GetContact).await?;
            self.state
                .read()
                .await
                .contacts
                .get(id)
                .cloned()
                .ok_or_else(|| PortError::not_found(ContactId::entity(), id))
        }

        async fn search_vehicles(
            &self,
            query: VehicleQuery,
            _metadata: Option<OperationMetadata>,
        ) -> Result<SearchPage<Vehicle>, PortError> {
            self.enter(MockOperation::SearchVehicles).await?;
            let state = self.state.read().await;
            let mut matching: Vec<Vehicle> = state
                .vehicles
                .values()
                .filter(|v| {
                    if let Some(ref location_id) = query.location_id {
                        if v.location_id.as_ref() != Some(location_id) {
                            return false;
                        }
                    }
                    if let Some(available) = query.available {
                        if v.available != available {
                            return false;
                        }
                    }
                    true
                })
                .cloned()
                .collect();
            matching.sort_by(|a, b| a.id.cmp(&b.id));

            let total = matching.len() as u64;
            let results = matching
                .into_iter()
                .skip(query.after as usize)
                .take(query.limit as usize)
                .collect();
            Ok(SearchPage { results, total })
        }

        async fn search_locations(
            &self,
            query: LocationQuery,
            _metadata: Option<OperationMetadata>,
        ) -> Result<SearchPage<Location>, PortError> {
            self.enter(MockOperation::SearchLocations).await?;
            let state = self.state.read().await;
            let matching: Vec<Location> = state
                .locations
                .iter()
                .filter(|l| l.postal_code == query.postal_code)
                .cloned()
                .collect();

            let total = matching.len() as u64;
            let results = matching
                .into_iter()
                .skip(query.after as usize)
                .take(query.limit as usize)
                .collect();
            Ok(SearchPage { results, total })
        }

        async fn create_rental_agreement(
            &self,
            agreement: NewRentalAgreement,
            _metadata: Option<OperationMetadata>,
        ) -> Result<RentalAgreementId, PortError> {
            self.enter(MockOperation::CreateRentalAgreement).await?;
            let mut state = self.state.write().await;
            state.next_rental_id += 1;
            let id = RentalAgreementId::new(format!("rental-{}", state.next_rental_id));
            state.rentals.push(RentalAgreement::from_draft(id.clone(), agreement));
            Ok(id)
        }

        async fn set_vehicle_availability(
            &self,
            id: &VehicleId,
            available: bool,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.enter(MockOperation::SetVehicleAvailability).await?;
            let mut state = self.state.write().await;
            let vehicle = state
                .vehicles
                .get_mut(id)
                .ok_or_else(|| PortError::not_found(VehicleId::entity(), id))?;
            vehicle.available = available;
            Ok(())
        }
    }
}
