//! CRM object API client
//!
//! Thin request builders for the four object endpoints. Every request carries
//! the configured bearer token. Calls are issued one at a time by the caller;
//! the client neither retries nor caches.
//!
//! # Error Handling
//!
//! Responses are mapped to `PortError` variants:
//! - 404 -> `PortError::NotFound`
//! - 401/403 -> `PortError::Unauthorized`
//! - 409 -> `PortError::Conflict`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Other 4xx -> `PortError::Validation`
//! - Timeouts -> `PortError::Timeout`
//! - Undecodable bodies -> `PortError::Transformation`

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use core_kernel::PortError;

use crate::config::CrmClientConfig;
use crate::dto::{CreateObjectRequest, CrmErrorBody, CrmObject, PatchObjectRequest, SearchRequest, SearchResponse};

/// Fallback wait reported for a 429 without a usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 10;

/// HTTP client for the CRM object API
#[derive(Debug, Clone)]
pub struct CrmClient {
    http: Client,
    config: CrmClientConfig,
}

impl CrmClient {
    /// Creates a client; fails if the access token is empty
    pub fn new(config: CrmClientConfig) -> Result<Self, PortError> {
        if config.access_token.trim().is_empty() {
            return Err(PortError::Unauthorized {
                message: "CRM access token is not configured".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortError::Internal {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CrmClientConfig {
        &self.config
    }

    /// `GET /crm/v3/objects/{type}/{id}?properties=...`
    pub async fn get_object(
        &self,
        object_type: &str,
        id: &str,
        properties: &[&str],
    ) -> Result<CrmObject, PortError> {
        let url = format!("{}/{}", self.config.objects_url(object_type), id);
        debug!(%url, "CRM read");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .query(&[("properties", properties.join(","))])
            .send()
            .await
            .map_err(|e| transport_error("read object", e, self.config.timeout_secs))?;

        let response = check_response(response, object_type, id).await?;
        decode(response).await
    }

    /// `POST /crm/v3/objects/{type}/search`
    pub async fn search_objects(
        &self,
        object_type: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, PortError> {
        let url = format!("{}/search", self.config.objects_url(object_type));
        debug!(%url, limit = request.limit, "CRM search");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("search objects", e, self.config.timeout_secs))?;

        let response = check_response(response, object_type, "search").await?;
        decode(response).await
    }

    /// `POST /crm/v3/objects/{type}`
    pub async fn create_object(
        &self,
        object_type: &str,
        request: &CreateObjectRequest,
    ) -> Result<CrmObject, PortError> {
        let url = self.config.objects_url(object_type);
        debug!(%url, associations = request.associations.len(), "CRM create");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("create object", e, self.config.timeout_secs))?;

        let response = check_response(response, object_type, "new").await?;
        decode(response).await
    }

    /// `PATCH /crm/v3/objects/{type}/{id}`
    pub async fn patch_object(
        &self,
        object_type: &str,
        id: &str,
        request: &PatchObjectRequest,
    ) -> Result<CrmObject, PortError> {
        let url = format!("{}/{}", self.config.objects_url(object_type), id);
        debug!(%url, "CRM patch");

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.config.access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("patch object", e, self.config.timeout_secs))?;

        let response = check_response(response, object_type, id).await?;
        decode(response).await
    }
}

/// Maps non-success statuses to `PortError`, returning the response otherwise
pub async fn check_response(
    response: Response,
    object_type: &str,
    id: &str,
) -> Result<Response, PortError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = parse_retry_after(&response);
    let body: CrmErrorBody = response.json().await.unwrap_or_default();
    let message = body
        .message
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    warn!(
        status = status.as_u16(),
        object_type,
        id,
        category = body.category.as_deref().unwrap_or(""),
        correlation_id = body.correlation_id.as_deref().unwrap_or(""),
        %message,
        "CRM request failed"
    );

    Err(status_error(status, object_type, id, message, retry_after))
}

fn status_error(
    status: StatusCode,
    object_type: &str,
    id: &str,
    message: String,
    retry_after: u64,
) -> PortError {
    match status {
        StatusCode::NOT_FOUND => PortError::not_found(object_type, id),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized { message },
        StatusCode::CONFLICT => PortError::Conflict { message },
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after,
        },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: format!("CRM ({}): {}", s.as_u16(), message),
        },
        _ => PortError::validation(message),
    }
}

/// Parse the `Retry-After` header as seconds
fn parse_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn transport_error(operation: &str, err: reqwest::Error, timeout_secs: u64) -> PortError {
    if err.is_timeout() {
        return PortError::Timeout {
            operation: operation.to_string(),
            duration_ms: timeout_secs * 1000,
        };
    }
    PortError::Connection {
        message: format!("{} failed: {}", operation, err),
        source: Some(Box::new(err)),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, PortError> {
    response
        .json::<T>()
        .await
        .map_err(|e| PortError::transformation(format!("unexpected CRM response body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_token() {
        let result = CrmClient::new(CrmClientConfig::default());
        assert!(matches!(result, Err(PortError::Unauthorized { .. })));
    }

    #[test]
    fn test_status_mapping() {
        let err = |code: u16| {
            status_error(
                StatusCode::from_u16(code).unwrap(),
                "contacts",
                "9",
                "msg".to_string(),
                DEFAULT_RETRY_AFTER_SECS,
            )
        };

        assert!(err(404).is_not_found());
        assert!(matches!(err(401), PortError::Unauthorized { .. }));
        assert!(matches!(err(403), PortError::Unauthorized { .. }));
        assert!(matches!(err(409), PortError::Conflict { .. }));
        assert!(matches!(err(429), PortError::RateLimited { retry_after_secs: 10 }));
        assert!(matches!(err(502), PortError::ServiceUnavailable { .. }));
        assert!(matches!(err(400), PortError::Validation { .. }));
    }
}
