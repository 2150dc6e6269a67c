//! Rental agreements

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ContactId, RentalAgreementId, RentalPeriod, VehicleId};

use crate::contact::Contact;
use crate::vehicle::Vehicle;

/// Builds the agreement name shown in the CRM: "Make Model Year - First Last"
pub fn display_name(vehicle: &Vehicle, contact: &Contact) -> String {
    format!("{} - {}", vehicle.label(), contact.full_name())
}

/// A validated request to rent a vehicle to a contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRequest {
    pub vehicle_id: VehicleId,
    pub contact_id: ContactId,
    pub period: RentalPeriod,
    pub insurance: bool,
}

/// An agreement ready to be written to the CRM, derived fields included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRentalAgreement {
    pub name: String,
    pub period: RentalPeriod,
    pub cost_per_day: Decimal,
    pub insurance: bool,
    pub total_days: i64,
    pub contact_id: ContactId,
    pub vehicle_id: VehicleId,
}

impl NewRentalAgreement {
    /// Computes the derived fields from the fetched vehicle and contact
    pub fn draft(vehicle: &Vehicle, contact: &Contact, period: RentalPeriod, insurance: bool) -> Self {
        Self {
            name: display_name(vehicle, contact),
            period,
            cost_per_day: vehicle.daily_price,
            insurance,
            total_days: period.total_days(),
            contact_id: contact.id.clone(),
            vehicle_id: vehicle.id.clone(),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.period.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.period.end
    }
}

/// A rental agreement as stored in the CRM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalAgreement {
    pub id: RentalAgreementId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cost_per_day: Decimal,
    pub insurance: bool,
    pub total_days: i64,
    pub contact_id: ContactId,
    pub vehicle_id: VehicleId,
}

impl RentalAgreement {
    /// Materialises a stored agreement from the draft and the id the CRM assigned
    pub fn from_draft(id: RentalAgreementId, draft: NewRentalAgreement) -> Self {
        Self {
            id,
            name: draft.name,
            start_date: draft.period.start,
            end_date: draft.period.end,
            cost_per_day: draft.cost_per_day,
            insurance: draft.insurance,
            total_days: draft.total_days,
            contact_id: draft.contact_id,
            vehicle_id: draft.vehicle_id,
        }
    }
}
