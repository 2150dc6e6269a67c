//! Health DTOs

use serde::Serialize;

use core_kernel::HealthCheckResult;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub crm: HealthCheckResult,
}
