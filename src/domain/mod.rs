//! Domain layer for the Tidings planner
//!
//! Entities, calendar value types, repository ports and domain errors.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
