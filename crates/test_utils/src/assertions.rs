//! Custom Test Assertions
//!
//! Assertion helpers for domain types with more useful failure messages
//! than a bare `assert!`.

use core_kernel::LocationId;
use domain_rental::Vehicle;

/// Asserts every vehicle is available and located at `location_id`
///
/// # Panics
///
/// Panics naming the first vehicle that breaks either condition
pub fn assert_all_available_at(vehicles: &[Vehicle], location_id: &LocationId) {
    for vehicle in vehicles {
        assert!(
            vehicle.available,
            "Vehicle {} ({}) is not available",
            vehicle.id,
            vehicle.label()
        );
        assert_eq!(
            vehicle.location_id.as_ref(),
            Some(location_id),
            "Vehicle {} is at {:?}, expected {}",
            vehicle.id,
            vehicle.location_id,
            location_id
        );
    }
}

/// Asserts a server-function payload is an `{error}` object
pub fn assert_error_payload(payload: &serde_json::Value) {
    assert!(
        payload.get("error").and_then(|e| e.as_str()).is_some(),
        "Expected an error payload, got {}",
        payload
    );
}
