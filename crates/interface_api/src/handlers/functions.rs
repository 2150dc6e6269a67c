//! Server function handlers
//!
//! `POST /functions/{name}` decodes the parameter object for the named
//! function, runs the matching service and wraps its outcome. Service
//! failures become `{"error": message}` payloads; only an unknown name or an
//! undecodable body is reported as an HTTP error.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use core_kernel::OperationMetadata;
use domain_rental::functions::{
    CreateRentalAgreementParams, FunctionResponse, GetLocationsParams,
    GetVehiclesForLocationParams, LocationResults, RentalCreated, VehicleResults,
    CREATE_RENTAL_AGREEMENT, GET_LOCATIONS, GET_VEHICLES_FOR_LOCATION,
};
use domain_rental::RentalError;

use crate::dto::functions::{InvokeRequest, InvokeResponse};
use crate::middleware::REQUEST_ID_HEADER;
use crate::{error::ApiError, AppState};

/// Invokes a server function by name
pub async fn invoke_function(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<InvokeRequest>, JsonRejection>,
) -> Result<Json<InvokeResponse>, ApiError> {
    let Json(request) = payload?;
    let metadata = metadata_for(&name, &headers);

    let response = match name.as_str() {
        GET_VEHICLES_FOR_LOCATION => {
            encode(get_vehicles_for_location(&state, request.parameters, metadata).await)?
        }
        CREATE_RENTAL_AGREEMENT => {
            encode(create_rental_agreement(&state, request.parameters, metadata).await)?
        }
        GET_LOCATIONS => encode(get_locations(&state, request.parameters, metadata).await)?,
        _ => return Err(ApiError::NotFound(format!("Unknown function: {}", name))),
    };

    Ok(Json(InvokeResponse::success(response)))
}

fn metadata_for(name: &str, headers: &HeaderMap) -> OperationMetadata {
    let metadata = match headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
        Some(request_id) => OperationMetadata::with_correlation_id(request_id),
        None => OperationMetadata::default(),
    };
    metadata.initiated_by(name)
}

fn parameters<T: DeserializeOwned>(parameters: Value) -> Result<T, RentalError> {
    serde_json::from_value(parameters)
        .map_err(|e| RentalError::invalid_request(format!("invalid parameters: {}", e)))
}

fn encode<T: Serialize>(response: FunctionResponse<T>) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(response)?)
}

fn finish<T>(function: &str, result: Result<T, RentalError>) -> FunctionResponse<T> {
    if let Err(e) = &result {
        match e.orphaned_rental() {
            Some(rental_id) => error!(
                function,
                rental_id = %rental_id,
                error = %e,
                transient = e.is_transient(),
                "Function failed after creating a rental"
            ),
            None => error!(function, error = %e, transient = e.is_transient(), "Function failed"),
        }
    }
    result.into()
}

async fn get_vehicles_for_location(
    state: &AppState,
    parameters_json: Value,
    metadata: OperationMetadata,
) -> FunctionResponse<VehicleResults> {
    let result = async {
        let params: GetVehiclesForLocationParams = parameters(parameters_json)?;
        state.vehicles.available_at(&params.location_id, Some(metadata)).await
    }
    .await;

    finish(GET_VEHICLES_FOR_LOCATION, result)
}

async fn create_rental_agreement(
    state: &AppState,
    parameters_json: Value,
    metadata: OperationMetadata,
) -> FunctionResponse<RentalCreated> {
    let result = async {
        let params: CreateRentalAgreementParams = parameters(parameters_json)?;
        let request = params.into_request()?;
        let rental_id = state.rentals.create(request, Some(metadata)).await?;
        info!(rental_id = %rental_id, "Rental agreement created");
        Ok::<_, RentalError>(RentalCreated::new(rental_id))
    }
    .await;

    finish(CREATE_RENTAL_AGREEMENT, result)
}

async fn get_locations(
    state: &AppState,
    parameters_json: Value,
    metadata: OperationMetadata,
) -> FunctionResponse<LocationResults> {
    let result = async {
        let params: GetLocationsParams = parameters(parameters_json)?;
        state.locations.by_postal_code(&params.zip_code, Some(metadata)).await
    }
    .await;

    finish(GET_LOCATIONS, result)
}
