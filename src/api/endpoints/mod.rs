//! API endpoint handlers.
//!
//! One module per clinic resource; request payloads and response
//! wrappers live next to the handlers that use them.

pub mod appointments;
pub mod consultations;
pub mod health;
pub mod patients;
pub mod physicians;
pub mod referrals;
pub mod reports;
pub mod reschedules;
