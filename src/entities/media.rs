//! Media entity - Photos or videos attached to an appointment.
//! Rows are append-only and removed together with their appointment.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Media attachment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointment_media")]
pub struct Model {
    /// Unique identifier for the attachment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Appointment this file documents
    pub appointment_id: i64,
    /// Where the file lives (path or URL)
    pub path: String,
    /// Type tag, e.g. `"before"` or `"after"`
    pub kind: String,
    /// When the attachment was recorded
    pub uploaded_at: DateTime,
}

/// Defines relationships between Media and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each attachment belongs to one appointment
    #[sea_orm(
        belongs_to = "super::appointment::Entity",
        from = "Column::AppointmentId",
        to = "super::appointment::Column::Id"
    )]
    Appointment,
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
