//! Health check handlers

use axum::{extract::State, Json};

use core_kernel::AdapterHealth;

use crate::dto::health::{HealthResponse, ReadinessResponse};
use crate::{error::ApiError, AppState};

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (probes the CRM adapter)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, ApiError> {
    let crm = state.crm.health_check().await;

    if crm.status == AdapterHealth::Unhealthy {
        return Err(ApiError::ServiceUnavailable(
            crm.message.unwrap_or_else(|| format!("{} is unhealthy", crm.adapter_id)),
        ));
    }

    Ok(Json(ReadinessResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        crm,
    }))
}
