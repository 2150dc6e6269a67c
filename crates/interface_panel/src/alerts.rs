//! Toast-style alerts raised by the panel

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

pub const FETCHING_LOCATIONS: &str = "Fetching locations...";
pub const LOCATIONS_FAILED: &str = "Error fetching locations";
pub const VEHICLES_FAILED: &str = "Error fetching vehicles";
pub const RENTAL_CREATED: &str = "Rental agreement created successfully!";
pub const RENTAL_FAILED: &str = "Error creating rental agreement";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: AlertKind::Info }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: AlertKind::Success }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: AlertKind::Error }
    }
}

/// Where the host UI receives alerts
pub trait AlertSink: Send + Sync {
    fn send(&self, alert: Alert);
}

/// Keeps every alert in order; hosts drain it after each action
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts: Mutex<Vec<Alert>>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes all alerts raised so far
    pub fn drain(&self) -> Vec<Alert> {
        match self.alerts.lock() {
            Ok(mut alerts) => std::mem::take(&mut *alerts),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl AlertSink for AlertLog {
    fn send(&self, alert: Alert) {
        tracing::debug!(kind = ?alert.kind, message = %alert.message, "Alert");
        match self.alerts.lock() {
            Ok(mut alerts) => alerts.push(alert),
            Err(poisoned) => poisoned.into_inner().push(alert),
        }
    }
}
