//! Customer entity - People who bring their motorcycles in for detailing.
//!
//! The referrer is stored as a plain optional id with an index rather than a
//! self-referential relation, so lookups go through `referrer_id` only.
//! `discount_credits` is the whole discount ledger for the customer, and
//! `referral_rewarded` records that their referrer has already been paid.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Contact phone, unique per customer
    #[sea_orm(unique)]
    pub phone: String,
    /// Optional street address
    pub address: Option<String>,
    /// Id of the customer who referred this one, if any
    #[sea_orm(indexed)]
    pub referrer_id: Option<i64>,
    /// Unused 10% discount credits earned through referrals
    pub discount_credits: i32,
    /// Set once this customer's referrer has been paid for them
    pub referral_rewarded: bool,
    /// When the customer was registered
    pub created_at: DateTime,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer owns many vehicles
    #[sea_orm(has_many = "super::vehicle::Entity")]
    Vehicles,
    /// One customer has many appointments
    #[sea_orm(has_many = "super::appointment::Entity")]
    Appointments,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicles.def()
    }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
