pub mod appointment;
pub mod consultation;
pub mod enums;
pub mod patient;
pub mod physician;
pub mod referral;
pub mod report;
pub mod reschedule;

pub use appointment::*;
pub use consultation::*;
pub use enums::*;
pub use patient::*;
pub use physician::*;
pub use referral::*;
pub use report::*;
pub use reschedule::*;
