//! Core use-case services.
//!
//! # Responsibility
//! - Apply loan and registration business rules over repository contracts.
//! - Keep CLI and facade callers decoupled from storage details.

pub mod loan_service;
pub mod registration_service;
