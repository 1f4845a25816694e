//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Appointment scheduling and status commands
pub mod appointment;

/// Customer and vehicle commands
pub mod customer;

/// General utility commands
pub mod general;

/// Product and stock commands
pub mod inventory;

/// Price list commands
pub mod pricing;

/// Financial report command
pub mod report;

// Export commands
pub use appointment::*;
pub use customer::*;
pub use general::*;
pub use inventory::*;
pub use pricing::*;
pub use report::*;
