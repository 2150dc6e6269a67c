//! Panel errors

use thiserror::Error;

/// Errors surfaced by panel actions
#[derive(Debug, Error)]
pub enum PanelError {
    /// The function server could not be reached or answered garbage
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Function server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The function ran and answered with `{error}`
    #[error("{function} failed: {message}")]
    Function { function: String, message: String },

    #[error("Both a start date and an end date are required")]
    FormIncomplete,

    #[error("No vehicle selected")]
    NoVehicleSelected,

    #[error("Vehicle {0} is not in the current list")]
    UnknownVehicle(String),
}

impl PanelError {
    pub fn function(function: impl Into<String>, message: impl Into<String>) -> Self {
        PanelError::Function {
            function: function.into(),
            message: message.into(),
        }
    }
}
