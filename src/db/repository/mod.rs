//! Repository layer — entity-scoped database operations.
//!
//! Free functions over a borrowed connection; multi-statement write
//! paths pass a transaction borrow instead and commit at the call site.
//! All public functions are re-exported here.

mod appointment;
mod consultation;
mod patient;
mod physician;
mod referral;
mod report;
mod reschedule;

pub use appointment::*;
pub use consultation::*;
pub use patient::*;
pub use physician::*;
pub use referral::*;
pub use report::*;
pub use reschedule::*;
