//! Service entity - The editable price list.
//!
//! Prices are copied into an appointment when it is scheduled, so editing a
//! service never changes what existing appointments were charged.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    /// Unique identifier for the service
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Vehicle category the service targets (e.g., "Naked", "Sport")
    pub category: String,
    /// Display name (e.g., "Premium Sport")
    pub name: String,
    /// Current price in the local currency
    pub price: f64,
}

/// `Service` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
