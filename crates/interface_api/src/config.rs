//! API configuration

use serde::Deserialize;

use infra_crm::CrmClientConfig;

/// Variable the CRM's serverless runtime uses for the private app token
pub const PRIVATE_APP_TOKEN_VAR: &str = "PRIVATE_APP_ACCESS_TOKEN";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// CRM API base URL
    pub crm_base_url: String,
    /// CRM private app access token
    pub crm_access_token: String,
    /// CRM request timeout in seconds
    pub crm_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let crm = CrmClientConfig::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            crm_base_url: crm.base_url,
            crm_access_token: String::new(),
            crm_timeout_secs: crm.timeout_secs,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    ///
    /// An unset `API_CRM_ACCESS_TOKEN` falls back to `PRIVATE_APP_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()?;

        Ok(config.with_token_fallback(std::env::var(PRIVATE_APP_TOKEN_VAR).ok()))
    }

    fn with_token_fallback(mut self, fallback: Option<String>) -> Self {
        if self.crm_access_token.trim().is_empty() {
            if let Some(token) = fallback {
                self.crm_access_token = token;
            }
        }
        self
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for the CRM client, default schema included
    pub fn crm_client_config(&self) -> CrmClientConfig {
        CrmClientConfig {
            base_url: self.crm_base_url.clone(),
            access_token: self.crm_access_token.clone(),
            timeout_secs: self.crm_timeout_secs,
            ..CrmClientConfig::default()
        }
    }
}
