//! Rental Card Presentation Layer
//!
//! A headless view-model of the CRM card that lets an agent rent a car to
//! the contact the card is shown on. It owns no rendering; a host UI reads
//! its state and forwards user actions to it.
//!
//! # Flow
//!
//! ```text
//! zip code -> locations (paged by 15) -> select location -> vehicle modal
//!          -> pick vehicle -> dates + insurance -> submit
//! ```
//!
//! The card reaches the backend only through [`ServerFunctions`]; use
//! [`HttpServerFunctions`] against a running function server or
//! [`LocalServerFunctions`] to call the domain services in-process.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_panel::{AlertLog, HttpServerFunctions, RentalPanel};
//!
//! let functions = Arc::new(HttpServerFunctions::new("http://localhost:8080")?);
//! let panel = RentalPanel::new(contact_id, functions, Arc::new(AlertLog::new()));
//! panel.set_zip_code("02139").await;
//! panel.search_locations().await?;
//! ```

pub mod error;
pub mod alerts;
pub mod functions;
pub mod pagination;
pub mod debounce;
pub mod rows;
pub mod panel;

pub use error::PanelError;
pub use alerts::{Alert, AlertKind, AlertLog, AlertSink};
pub use functions::{HttpServerFunctions, LocalServerFunctions, ServerFunctions};
pub use pagination::{Paginator, PAGE_SIZE};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use rows::{LocationRow, VehicleRow};
pub use panel::{PanelPhase, RentalForm, RentalPanel};
