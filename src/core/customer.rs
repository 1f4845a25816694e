//! Customer business logic - Registration and lookups.
//!
//! Registration validates input into a [`NewCustomer`], resolves the referrer
//! by id, and inserts the customer together with an optional first vehicle in a
//! single transaction. Referral rewards are not granted here; they are paid when
//! the referred customer completes a first wash (see `core::appointment`).

use crate::{
    core::vehicle::{self, NewVehicle},
    entities::{Customer, customer, vehicle as vehicle_entity},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Validated input for registering a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    /// Full name
    pub name: String,
    /// Contact phone (unique)
    pub phone: String,
    /// Street address
    pub address: Option<String>,
    /// Id of the customer who referred this one
    pub referrer_id: Option<i64>,
}

impl NewCustomer {
    /// Trims every field and rejects empty names or phones.
    ///
    /// # Errors
    /// Returns `InvalidInput` when the name or phone is blank.
    pub fn new(
        name: &str,
        phone: &str,
        address: Option<&str>,
        referrer_id: Option<i64>,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput {
                message: "Customer name cannot be empty".to_string(),
            });
        }

        let phone = phone.trim();
        if phone.is_empty() {
            return Err(Error::InvalidInput {
                message: "Phone number cannot be empty".to_string(),
            });
        }

        let address = address
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(ToString::to_string);

        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
            address,
            referrer_id,
        })
    }
}

/// Registers a customer, optionally with their first vehicle.
///
/// Both rows are written in one transaction: if the vehicle is invalid or the
/// insert fails, the customer is not created either.
///
/// # Errors
/// Returns an error if:
/// - The phone number is already registered (`PhoneTaken`)
/// - The referrer does not exist (`CustomerNotFound`)
/// - The database insert fails
#[instrument(skip(db), fields(phone = %new_customer.phone))]
pub async fn register_customer(
    db: &DatabaseConnection,
    new_customer: NewCustomer,
    first_vehicle: Option<NewVehicle>,
) -> Result<(customer::Model, Option<vehicle_entity::Model>)> {
    let txn = db.begin().await?;

    let existing = Customer::find()
        .filter(customer::Column::Phone.eq(new_customer.phone.as_str()))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(Error::PhoneTaken {
            phone: new_customer.phone,
        });
    }

    if let Some(referrer_id) = new_customer.referrer_id {
        Customer::find_by_id(referrer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::CustomerNotFound {
                id: referrer_id.to_string(),
            })?;
    }

    let customer = customer::ActiveModel {
        name: Set(new_customer.name),
        phone: Set(new_customer.phone),
        address: Set(new_customer.address),
        referrer_id: Set(new_customer.referrer_id),
        discount_credits: Set(0),
        referral_rewarded: Set(false),
        created_at: Set(chrono::Local::now().naive_local()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let vehicle = match first_vehicle {
        Some(new_vehicle) => Some(vehicle::insert_vehicle(&txn, customer.id, new_vehicle).await?),
        None => None,
    };

    txn.commit().await?;

    info!(customer_id = customer.id, "Customer registered");
    Ok((customer, vehicle))
}

/// Retrieves a customer by id.
pub async fn get_customer_by_id(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Option<customer::Model>> {
    Customer::find_by_id(customer_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a customer by exact phone number.
pub async fn get_customer_by_phone(
    db: &DatabaseConnection,
    phone: &str,
) -> Result<Option<customer::Model>> {
    Customer::find()
        .filter(customer::Column::Phone.eq(phone.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every customer, ordered by name.
pub async fn list_customers(db: &DatabaseConnection) -> Result<Vec<customer::Model>> {
    Customer::find()
        .order_by_asc(customer::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the customers referred by `referrer_id`.
pub async fn list_referrals(
    db: &DatabaseConnection,
    referrer_id: i64,
) -> Result<Vec<customer::Model>> {
    Customer::find()
        .filter(customer::Column::ReferrerId.eq(referrer_id))
        .order_by_asc(customer::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}
