//! CRM client configuration

use serde::Deserialize;

/// Default CRM API host
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Connection settings for the CRM REST API
///
/// The access token is passed in at construction and sent as a bearer token
/// on every request. It is never read from the environment per call.
#[derive(Debug, Clone, Deserialize)]
pub struct CrmClientConfig {
    /// Base URL of the CRM API (e.g., "https://api.hubapi.com")
    pub base_url: String,

    /// Private app access token
    pub access_token: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Object type keys and association ids of the rental schema
    #[serde(default)]
    pub schema: CrmSchema,
}

impl Default for CrmClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: String::new(),
            timeout_secs: 30,
            schema: CrmSchema::default(),
        }
    }
}

impl CrmClientConfig {
    /// Default settings with the given access token
    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    /// Overrides the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// URL of the object collection for a type key
    pub fn objects_url(&self, object_type: &str) -> String {
        format!(
            "{}/crm/v3/objects/{}",
            self.base_url.trim_end_matches('/'),
            object_type
        )
    }
}

/// Object type keys and association type ids of the rental custom objects
///
/// The defaults are the ids assigned in the portal the extension was built for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrmSchema {
    pub vehicle_object_type: String,
    pub rental_object_type: String,
    pub location_object_type: String,
    pub contact_object_type: String,
    /// Association type from a rental agreement to its contact
    pub rental_to_contact_association: u32,
    /// Association type from a rental agreement to its vehicle
    pub rental_to_vehicle_association: u32,
}

impl Default for CrmSchema {
    fn default() -> Self {
        Self {
            vehicle_object_type: "2-45804562".to_string(),
            rental_object_type: "2-45804812".to_string(),
            location_object_type: "2-45804803".to_string(),
            contact_object_type: "contacts".to_string(),
            rental_to_contact_association: 87,
            rental_to_vehicle_association: 84,
        }
    }
}
