//! Contact records (read-only)

use serde::{Deserialize, Serialize};

use core_kernel::ContactId;

/// Properties requested when reading a contact
pub const CONTACT_READ_PROPERTIES: &[&str] = &["firstname", "lastname"];

/// A CRM contact that rents a vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Contact {
    /// First and last name separated by a space; missing parts are left empty
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let contact = Contact {
            id: ContactId::new("1"),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
        };
        assert_eq!(contact.full_name(), "Jane Doe");
    }

    #[test]
    fn test_full_name_missing_last_name() {
        let contact = Contact {
            id: ContactId::new("1"),
            first_name: Some("Cher".to_string()),
            last_name: None,
        };
        assert_eq!(contact.full_name(), "Cher ");
    }
}
