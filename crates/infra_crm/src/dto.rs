//! CRM object API payloads
//!
//! Explicit request/response bodies for the four object endpoints. Property
//! values travel as strings in both directions.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An object as returned by read and search endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmObject {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, Option<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
}

impl CrmObject {
    /// Returns a non-empty property value
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.is_empty())
    }
}

/// Comparison operators accepted by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Eq,
}

/// A single property filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub property_name: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl Filter {
    pub fn eq(property_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            operator: FilterOperator::Eq,
            value: value.into(),
        }
    }
}

/// Filters that must all match (AND); separate groups are OR-ed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

/// Body of `POST /crm/v3/objects/{type}/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub filter_groups: Vec<FilterGroup>,
    pub properties: Vec<String>,
    pub limit: u32,
    pub after: u32,
}

impl SearchRequest {
    /// A search whose single filter group ANDs the given filters
    pub fn matching_all(filters: Vec<Filter>, properties: &[&str], limit: u32, after: u32) -> Self {
        Self {
            filter_groups: vec![FilterGroup { filters }],
            properties: properties.iter().map(|p| p.to_string()).collect(),
            limit,
            after,
        }
    }
}

/// Cursor to the next page; reported but never followed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub next: Option<NextPage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPage {
    pub after: String,
}

/// Response of the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: u64,
    #[serde(default)]
    pub results: Vec<CrmObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

/// Association category as defined by the CRM schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssociationCategory {
    UserDefined,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationType {
    pub association_category: AssociationCategory,
    pub association_type_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationTarget {
    pub id: String,
}

/// An association created together with a new object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationInput {
    pub types: Vec<AssociationType>,
    pub to: AssociationTarget,
}

impl AssociationInput {
    /// A user-defined association to the object `to_id`
    pub fn user_defined(type_id: u32, to_id: impl Into<String>) -> Self {
        Self {
            types: vec![AssociationType {
                association_category: AssociationCategory::UserDefined,
                association_type_id: type_id,
            }],
            to: AssociationTarget { id: to_id.into() },
        }
    }
}

/// Body of `POST /crm/v3/objects/{type}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateObjectRequest {
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associations: Vec<AssociationInput>,
}

/// Body of `PATCH /crm/v3/objects/{type}/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchObjectRequest {
    pub properties: BTreeMap<String, String>,
}

impl PatchObjectRequest {
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(name.into(), value.into());
        Self { properties }
    }
}

/// Error body returned by the CRM on non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmErrorBody {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_shape() {
        let request = SearchRequest::matching_all(
            vec![Filter::eq("location", "123"), Filter::eq("available", "true")],
            &["vin", "make"],
            100,
            0,
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "filterGroups": [{
                    "filters": [
                        {"propertyName": "location", "operator": "EQ", "value": "123"},
                        {"propertyName": "available", "operator": "EQ", "value": "true"}
                    ]
                }],
                "properties": ["vin", "make"],
                "limit": 100,
                "after": 0
            })
        );
    }

    #[test]
    fn test_association_shape() {
        let association = AssociationInput::user_defined(87, "501");
        assert_eq!(
            serde_json::to_value(&association).unwrap(),
            json!({
                "types": [{"associationCategory": "USER_DEFINED", "associationTypeId": 87}],
                "to": {"id": "501"}
            })
        );
    }

    #[test]
    fn test_object_property_skips_null_and_empty() {
        let object: CrmObject = serde_json::from_value(json!({
            "id": "1",
            "properties": {"vin": null, "make": "", "model": "Civic"},
            "createdAt": "2024-01-01T00:00:00Z",
            "archived": false
        }))
        .unwrap();

        assert_eq!(object.property("vin"), None);
        assert_eq!(object.property("make"), None);
        assert_eq!(object.property("model"), Some("Civic"));
    }

    #[test]
    fn test_search_response_without_paging() {
        let response: SearchResponse =
            serde_json::from_value(json!({"total": 0, "results": []})).unwrap();
        assert!(response.paging.is_none());
    }
}
