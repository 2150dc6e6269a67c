//! Strongly-typed identifiers for CRM objects
//!
//! The CRM hands out opaque string identifiers. Wrapping them in newtypes
//! keeps a vehicle id from being passed where a contact id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an identifier from user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} id must not be empty")]
pub struct InvalidId {
    pub entity: &'static str,
}

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier issued by the CRM
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the raw identifier as sent to the CRM
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the entity name used in log fields and errors
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(InvalidId { entity: $entity });
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_id!(VehicleId, "Vehicle");
define_id!(ContactId, "Contact");
define_id!(LocationId, "Location");
define_id!(RentalAgreementId, "RentalAgreement");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_id() {
        let id = VehicleId::new("18472");
        assert_eq!(id.to_string(), "18472");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed: ContactId = "  901 ".parse().unwrap();
        assert_eq!(parsed.as_str(), "901");
    }

    #[test]
    fn test_parse_rejects_empty() {
        let err = "   ".parse::<LocationId>().unwrap_err();
        assert_eq!(err.entity, "Location");
    }
}
