//! Request/response bodies

pub mod functions;
pub mod health;
