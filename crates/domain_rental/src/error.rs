//! Rental domain errors

use thiserror::Error;

use core_kernel::{PortError, RentalAgreementId, TemporalError, VehicleId};

/// Errors that can occur in the rental domain
#[derive(Debug, Error)]
pub enum RentalError {
    #[error("Invalid rental request: {0}")]
    InvalidRequest(String),

    #[error("Invalid rental period: {0}")]
    InvalidPeriod(#[from] TemporalError),

    #[error("CRM request failed: {0}")]
    Crm(#[from] PortError),

    /// The agreement was created but the vehicle could not be marked unavailable.
    /// The agreement is not rolled back.
    #[error("Rental agreement {rental_id} was created but vehicle {vehicle_id} is still marked available: {source}")]
    AvailabilityNotUpdated {
        rental_id: RentalAgreementId,
        vehicle_id: VehicleId,
        #[source]
        source: PortError,
    },
}

impl RentalError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        RentalError::InvalidRequest(message.into())
    }

    /// Returns the id of an agreement left behind by a partially failed creation
    pub fn orphaned_rental(&self) -> Option<&RentalAgreementId> {
        match self {
            RentalError::AvailabilityNotUpdated { rental_id, .. } => Some(rental_id),
            _ => None,
        }
    }

    /// True when the underlying CRM failure may clear up on its own
    pub fn is_transient(&self) -> bool {
        match self {
            RentalError::Crm(source) | RentalError::AvailabilityNotUpdated { source, .. } => {
                source.is_transient()
            }
            _ => false,
        }
    }
}
