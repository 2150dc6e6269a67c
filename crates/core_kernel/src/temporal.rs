//! Rental period handling
//!
//! This module provides the date types used when booking a vehicle:
//! - `DateInput`: a date as submitted by the CRM date picker or an API caller
//! - `RentalPeriod`: a validated start/end pair with the day count

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: end {end} is before start {start}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Invalid date: year {year}, month index {month}, day {day}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
    },
}

/// A calendar date as submitted by a caller
///
/// The CRM date picker emits an object whose `month` is zero-based
/// (`{"year": 2024, "month": 0, "date": 5, "formattedDate": "01/05/2024"}`).
/// Plain API callers may send an ISO `YYYY-MM-DD` string instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Iso(NaiveDate),
    Picker {
        year: i32,
        month: u32,
        date: u32,
        #[serde(rename = "formattedDate", default, skip_serializing_if = "Option::is_none")]
        formatted_date: Option<String>,
    },
}

impl DateInput {
    /// Resolves the input to a calendar date
    pub fn to_date(&self) -> Result<NaiveDate, TemporalError> {
        match self {
            DateInput::Iso(date) => Ok(*date),
            DateInput::Picker { year, month, date, .. } => {
                month
                    .checked_add(1)
                    .and_then(|month| NaiveDate::from_ymd_opt(*year, month, *date))
                    .ok_or(TemporalError::InvalidDate {
                        year: *year,
                        month: *month,
                        day: *date,
                    })
            }
        }
    }

    /// Builds the picker representation of a date
    pub fn picker(date: NaiveDate) -> Self {
        DateInput::Picker {
            year: date.year(),
            month: date.month0(),
            date: date.day(),
            formatted_date: Some(date.format("%m/%d/%Y").to_string()),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Iso(date)
    }
}

/// The booked span of a rental, start and end inclusive of the calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RentalPeriod {
    /// Creates a period, rejecting an end date before the start date
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if end < start {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a period from two caller-supplied date inputs
    pub fn from_inputs(start: &DateInput, end: &DateInput) -> Result<Self, TemporalError> {
        Self::new(start.to_date()?, end.to_date()?)
    }

    /// Number of whole days between start and end
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
