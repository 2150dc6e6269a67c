//! Access to the server functions
//!
//! [`ServerFunctions`] is the seam between the card and the backend. The HTTP
//! implementation posts to a running function server; the local one calls
//! the domain services directly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use core_kernel::LocationId;
use domain_rental::functions::{
    CreateRentalAgreementParams, FunctionResponse, GetLocationsParams,
    GetVehiclesForLocationParams, LocationResults, RentalCreated, VehicleResults,
    CREATE_RENTAL_AGREEMENT, GET_LOCATIONS, GET_VEHICLES_FOR_LOCATION,
};
use domain_rental::{CrmPort, LocationSearchService, RentalAgreementCreator, VehicleSearchService};

use crate::error::PanelError;

/// The three functions the card invokes
#[async_trait]
pub trait ServerFunctions: Send + Sync {
    async fn get_locations(&self, zip_code: &str) -> Result<LocationResults, PanelError>;

    async fn get_vehicles_for_location(
        &self,
        location_id: &LocationId,
    ) -> Result<VehicleResults, PanelError>;

    async fn create_rental_agreement(
        &self,
        params: CreateRentalAgreementParams,
    ) -> Result<RentalCreated, PanelError>;
}

#[derive(Serialize)]
struct Invocation<P> {
    parameters: P,
}

#[derive(Deserialize)]
struct Invoked<T> {
    response: FunctionResponse<T>,
}

/// Calls a function server over HTTP
#[derive(Debug, Clone)]
pub struct HttpServerFunctions {
    http: reqwest::Client,
    base_url: String,
}

impl HttpServerFunctions {
    pub fn new(base_url: impl Into<String>) -> Result<Self, PanelError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn invoke<P: Serialize + Sync, T: DeserializeOwned>(
        &self,
        name: &str,
        parameters: &P,
    ) -> Result<T, PanelError> {
        let url = format!("{}/functions/{}", self.base_url, name);
        debug!(%url, "Invoking server function");

        let response = self
            .http
            .post(&url)
            .json(&Invocation { parameters })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(function = name, status = status.as_u16(), "Server function rejected");
            return Err(PanelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let invoked: Invoked<T> = response.json().await?;
        invoked
            .response
            .into_result()
            .map_err(|message| PanelError::function(name, message))
    }
}

#[async_trait]
impl ServerFunctions for HttpServerFunctions {
    async fn get_locations(&self, zip_code: &str) -> Result<LocationResults, PanelError> {
        let params = GetLocationsParams {
            zip_code: zip_code.to_string(),
        };
        self.invoke(GET_LOCATIONS, &params).await
    }

    async fn get_vehicles_for_location(
        &self,
        location_id: &LocationId,
    ) -> Result<VehicleResults, PanelError> {
        let params = GetVehiclesForLocationParams {
            location_id: location_id.clone(),
        };
        self.invoke(GET_VEHICLES_FOR_LOCATION, &params).await
    }

    async fn create_rental_agreement(
        &self,
        params: CreateRentalAgreementParams,
    ) -> Result<RentalCreated, PanelError> {
        self.invoke(CREATE_RENTAL_AGREEMENT, &params).await
    }
}

/// Runs the functions in-process against a CRM port
pub struct LocalServerFunctions {
    vehicles: VehicleSearchService,
    locations: LocationSearchService,
    rentals: RentalAgreementCreator,
}

impl LocalServerFunctions {
    pub fn new(crm: Arc<dyn CrmPort>) -> Self {
        Self {
            vehicles: VehicleSearchService::new(crm.clone()),
            locations: LocationSearchService::new(crm.clone()),
            rentals: RentalAgreementCreator::new(crm),
        }
    }
}

#[async_trait]
impl ServerFunctions for LocalServerFunctions {
    async fn get_locations(&self, zip_code: &str) -> Result<LocationResults, PanelError> {
        self.locations
            .by_postal_code(zip_code, None)
            .await
            .map_err(|e| PanelError::function(GET_LOCATIONS, e.to_string()))
    }

    async fn get_vehicles_for_location(
        &self,
        location_id: &LocationId,
    ) -> Result<VehicleResults, PanelError> {
        self.vehicles
            .available_at(location_id, None)
            .await
            .map_err(|e| PanelError::function(GET_VEHICLES_FOR_LOCATION, e.to_string()))
    }

    async fn create_rental_agreement(
        &self,
        params: CreateRentalAgreementParams,
    ) -> Result<RentalCreated, PanelError> {
        let fail = |e: domain_rental::RentalError| PanelError::function(CREATE_RENTAL_AGREEMENT, e.to_string());
        let request = params.into_request().map_err(fail)?;
        let rental_id = self.rentals.create(request, None).await.map_err(fail)?;
        Ok(RentalCreated::new(rental_id))
    }
}
