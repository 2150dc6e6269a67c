//! CRM Infrastructure Layer
//!
//! This crate talks to the CRM object API over HTTPS and adapts it to the
//! rental domain's [`domain_rental::CrmPort`].
//!
//! # Components
//!
//! - **Config**: Base URL, bearer token, timeout, and the custom-object schema
//! - **DTOs**: Typed request/response bodies for read, search, create, patch
//! - **Client**: The four object API calls with status-to-error mapping
//! - **Mapping**: Conversions between CRM property bags and domain records
//! - **Adapter**: `CrmRestAdapter`, the `CrmPort` implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_crm::{CrmClient, CrmClientConfig, CrmRestAdapter};
//!
//! let client = CrmClient::new(CrmClientConfig::with_token(token))?;
//! let adapter = CrmRestAdapter::new(client);
//! ```

pub mod config;
pub mod dto;
pub mod client;
pub mod mapping;
pub mod adapter;

pub use config::{CrmClientConfig, CrmSchema};
pub use client::CrmClient;
pub use adapter::CrmRestAdapter;
