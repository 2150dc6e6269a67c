//! Conversions between CRM property bags and domain records

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use core_kernel::{ContactId, LocationId, PortError, VehicleId};
use domain_rental::{Contact, Location, NewRentalAgreement, Vehicle};

use crate::config::CrmSchema;
use crate::dto::{AssociationInput, CreateObjectRequest, CrmObject};

/// CRM encoding of a boolean property
pub fn bool_property(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn required<'a>(object: &'a CrmObject, entity: &str, name: &str) -> Result<&'a str, PortError> {
    object.property(name).ok_or_else(|| {
        PortError::transformation(format!("{} {} has no {} property", entity, object.id, name))
    })
}

fn parsed<T: FromStr>(object: &CrmObject, entity: &str, name: &str) -> Result<T, PortError> {
    let raw = required(object, entity, name)?;
    raw.trim().parse().map_err(|_| {
        PortError::transformation(format!(
            "{} {} property {} is not valid: {:?}",
            entity, object.id, name, raw
        ))
    })
}

/// Maps a vehicle object; `available` is false unless the property reads "true"
pub fn vehicle_from_object(object: &CrmObject) -> Result<Vehicle, PortError> {
    let entity = VehicleId::entity();
    Ok(Vehicle {
        id: VehicleId::new(object.id.clone()),
        vin: object.property("vin").map(str::to_string),
        make: required(object, entity, "make")?.to_string(),
        model: required(object, entity, "model")?.to_string(),
        year: parsed::<i32>(object, entity, "year")?,
        daily_price: parsed::<Decimal>(object, entity, "daily_price")?,
        available: object.property("available") == Some("true"),
        location_id: object.property("location").map(LocationId::from),
    })
}

pub fn contact_from_object(object: &CrmObject) -> Contact {
    Contact {
        id: ContactId::new(object.id.clone()),
        first_name: object.property("firstname").map(str::to_string),
        last_name: object.property("lastname").map(str::to_string),
    }
}

pub fn location_from_object(object: &CrmObject) -> Result<Location, PortError> {
    let text = |name: &str| object.property(name).unwrap_or_default().to_string();
    let available_vehicles = match object.property("number_of_available_vehicles") {
        Some(_) => parsed::<u32>(object, LocationId::entity(), "number_of_available_vehicles")?,
        None => 0,
    };

    Ok(Location {
        id: LocationId::new(object.id.clone()),
        postal_code: text("postal_code"),
        address: text("address_1"),
        city: text("city"),
        state: text("state"),
        available_vehicles,
    })
}

/// Builds the create body for a rental agreement with its two associations
pub fn rental_create_request(agreement: &NewRentalAgreement, schema: &CrmSchema) -> CreateObjectRequest {
    let mut properties = BTreeMap::new();
    properties.insert("name".to_string(), agreement.name.clone());
    properties.insert("start_date".to_string(), agreement.start_date().format("%Y-%m-%d").to_string());
    properties.insert("end_date".to_string(), agreement.end_date().format("%Y-%m-%d").to_string());
    properties.insert("cost_per_day".to_string(), agreement.cost_per_day.to_string());
    properties.insert("insurance".to_string(), bool_property(agreement.insurance).to_string());
    properties.insert("total_days".to_string(), agreement.total_days.to_string());

    CreateObjectRequest {
        properties,
        associations: vec![
            AssociationInput::user_defined(
                schema.rental_to_contact_association,
                agreement.contact_id.as_str(),
            ),
            AssociationInput::user_defined(
                schema.rental_to_vehicle_association,
                agreement.vehicle_id.as_str(),
            ),
        ],
    }
}
