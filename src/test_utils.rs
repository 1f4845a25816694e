//! Shared test utilities for `DetailBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        appointment::{self, NewAppointment},
        customer::{self, NewCustomer},
        inventory::{self, NewProduct},
        pricing::{self, NewService},
        vehicle::{self, NewVehicle},
    },
    entities,
    errors::Result,
};
use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A fixed booking time far in the future.
pub fn test_schedule_time() -> NaiveDateTime {
    appointment::parse_schedule("2030-01-01", "09:00").unwrap_or_default()
}

/// Creates a customer with no address and no referrer.
pub async fn create_test_customer(
    db: &DatabaseConnection,
    name: &str,
    phone: &str,
) -> Result<entities::customer::Model> {
    let new_customer = NewCustomer::new(name, phone, None, None)?;
    let (customer, _) = customer::register_customer(db, new_customer, None).await?;
    Ok(customer)
}

/// Creates a customer referred by `referrer_id`.
pub async fn create_referred_customer(
    db: &DatabaseConnection,
    name: &str,
    phone: &str,
    referrer_id: i64,
) -> Result<entities::customer::Model> {
    let new_customer = NewCustomer::new(name, phone, None, Some(referrer_id))?;
    let (customer, _) = customer::register_customer(db, new_customer, None).await?;
    Ok(customer)
}

/// Adds a vehicle with sensible defaults.
///
/// # Defaults
/// * `model`: "MT-07"
/// * `category`: "Naked"
pub async fn create_test_vehicle(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<entities::vehicle::Model> {
    let new_vehicle = NewVehicle::new("MT-07", None, Some("Yamaha"), Some("Naked"), None)?;
    vehicle::add_vehicle(db, customer_id, new_vehicle).await
}

/// Schedules an appointment at [`test_schedule_time`] for "Standard Naked".
pub async fn create_test_appointment(
    db: &DatabaseConnection,
    customer_id: i64,
    vehicle_id: i64,
    base_price: f64,
) -> Result<entities::appointment::Model> {
    let new_appointment = NewAppointment::new(
        customer_id,
        vehicle_id,
        test_schedule_time(),
        "Standard Naked",
        base_price,
    )?;
    appointment::schedule_appointment(db, new_appointment).await
}

/// Registers a product with a reorder point of 10.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    stock: f64,
    purchase_cost: f64,
    purchase_quantity: f64,
    usage_per_wash: f64,
) -> Result<entities::product::Model> {
    let new_product = NewProduct::new(
        name,
        "ml",
        stock,
        purchase_cost,
        purchase_quantity,
        usage_per_wash,
        None,
    )?;
    inventory::register_product(db, new_product).await
}

/// Adds a catalog service.
pub async fn create_test_service(
    db: &DatabaseConnection,
    category: &str,
    name: &str,
    price: f64,
) -> Result<entities::service::Model> {
    pricing::create_service(db, NewService::new(category, name, price)?).await
}

/// Sets up a complete test environment with a customer and their vehicle.
/// Returns (db, customer, vehicle) for common test scenarios.
pub async fn setup_with_vehicle() -> Result<(
    DatabaseConnection,
    entities::customer::Model,
    entities::vehicle::Model,
)> {
    let db = setup_test_db().await?;
    let customer = create_test_customer(&db, "Test Customer", "5550000").await?;
    let vehicle = create_test_vehicle(&db, customer.id).await?;
    Ok((db, customer, vehicle))
}

/// Sets up a scheduled appointment for a fresh customer with no credits.
/// Returns (db, appointment) for transition tests.
pub async fn setup_with_appointment(
    base_price: f64,
) -> Result<(DatabaseConnection, entities::appointment::Model)> {
    let (db, customer, vehicle) = setup_with_vehicle().await?;
    let appointment = create_test_appointment(&db, customer.id, vehicle.id, base_price).await?;
    Ok((db, appointment))
}
