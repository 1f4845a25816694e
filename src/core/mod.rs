//! Core business logic - framework-agnostic operations over the database.
//!
//! Nothing in here knows about Discord. Operations take validated input
//! structs, open their own transaction when they mutate more than one row,
//! and return models or [`crate::errors::Error`].

/// Appointment scheduling and the status state machine
pub mod appointment;
/// Startup seeding of the catalog
pub mod bootstrap;
/// Customer registration and lookups
pub mod customer;
/// Referral discount credits
pub mod discount;
/// Product stock and per-wash depletion
pub mod inventory;
/// Appointment media attachments
pub mod media;
/// Severity-tagged outcome messages
pub mod notice;
/// Service price list
pub mod pricing;
/// Read-only financial reports
pub mod report;
/// Vehicle registry
pub mod vehicle;
