//! Appointment entity - A scheduled wash for one customer's vehicle.
//!
//! The status moves `Scheduled -> InProgress -> Completed`, with `Cancelled`
//! reachable from either non-terminal state. `product_cost` stays at zero
//! until the first completion runs the inventory depletion pass.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AppointmentStatus {
    /// Booked, not started
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    /// Wash under way
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Wash finished
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Called off before completion
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl AppointmentStatus {
    /// Completed and Cancelled appointments accept no further transitions
    /// (other than repeated completion, which is idempotent).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    ///
    /// Repeating `Completed` is allowed so a second completion call only
    /// refreshes the finish time. Repeating `InProgress` refreshes the start time.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Scheduled, Self::InProgress | Self::Completed | Self::Cancelled)
            | (Self::InProgress, Self::InProgress | Self::Completed | Self::Cancelled)
            | (Self::Completed, Self::Completed)
            | (Self::Cancelled, Self::Cancelled) => true,
            _ => false,
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Appointment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    /// Unique identifier for the appointment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer being served
    pub customer_id: i64,
    /// Vehicle being washed
    pub vehicle_id: i64,
    /// Booked date and time
    pub scheduled_at: DateTime,
    /// Current lifecycle status
    pub status: AppointmentStatus,
    /// Service label copied from the catalog (e.g., "Premium Sport")
    pub service_type: String,
    /// Price charged, after any referral discount
    pub charged_price: f64,
    /// Whether a discount credit was spent on this appointment
    pub discount_applied: bool,
    /// When the wash started
    pub started_at: Option<DateTime>,
    /// When the wash finished
    pub finished_at: Option<DateTime>,
    /// Product cost accumulated by the depletion pass
    pub product_cost: f64,
    /// Other costs incurred for this wash
    pub extra_expenses: f64,
}

/// Defines relationships between Appointment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each appointment belongs to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    /// Each appointment is for one vehicle
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id"
    )]
    Vehicle,
    /// One appointment has many media attachments
    #[sea_orm(has_many = "super::media::Entity")]
    Media,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Media.def()
    }
}

impl Model {
    /// Whether the depletion pass has yet to run for this appointment.
    ///
    /// A zero product cost stands in for "not yet completed once"; a wash whose
    /// products genuinely cost nothing will be depleted again on the next
    /// completion call.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn needs_depletion(&self) -> bool {
        self.product_cost == 0.0
    }
}

impl ActiveModelBehavior for ActiveModel {}
