//! Vehicle business logic - Motorcycles owned by customers.

use crate::{
    entities::{Customer, Vehicle, vehicle},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Category used when none is given.
pub const DEFAULT_CATEGORY: &str = "Naked";

/// Validated input for adding or editing a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    /// Model name
    pub model: String,
    /// License plate
    pub plate: Option<String>,
    /// Manufacturer
    pub brand: Option<String>,
    /// Pricing category
    pub category: String,
    /// Free-form notes
    pub notes: Option<String>,
}

impl NewVehicle {
    /// Trims the inputs, upper-cases the plate and applies the default category.
    ///
    /// # Errors
    /// Returns `InvalidInput` when the model is blank.
    pub fn new(
        model: &str,
        plate: Option<&str>,
        brand: Option<&str>,
        category: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Self> {
        let model = model.trim();
        if model.is_empty() {
            return Err(Error::InvalidInput {
                message: "Vehicle model cannot be empty".to_string(),
            });
        }

        Ok(Self {
            model: model.to_string(),
            plate: non_blank(plate).map(|p| p.to_uppercase()),
            brand: non_blank(brand),
            category: non_blank(category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            notes: non_blank(notes),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Inserts a vehicle for a customer on any connection or open transaction.
pub(crate) async fn insert_vehicle<C>(
    db: &C,
    customer_id: i64,
    new_vehicle: NewVehicle,
) -> Result<vehicle::Model>
where
    C: ConnectionTrait,
{
    vehicle::ActiveModel {
        customer_id: Set(customer_id),
        model: Set(new_vehicle.model),
        plate: Set(new_vehicle.plate),
        brand: Set(new_vehicle.brand),
        category: Set(new_vehicle.category),
        notes: Set(new_vehicle.notes),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Adds a vehicle to an existing customer.
///
/// # Errors
/// Returns `CustomerNotFound` if the customer does not exist, or a database error.
#[instrument(skip(db))]
pub async fn add_vehicle(
    db: &DatabaseConnection,
    customer_id: i64,
    new_vehicle: NewVehicle,
) -> Result<vehicle::Model> {
    Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CustomerNotFound {
            id: customer_id.to_string(),
        })?;

    let vehicle = insert_vehicle(db, customer_id, new_vehicle).await?;
    info!(vehicle_id = vehicle.id, "Vehicle added");
    Ok(vehicle)
}

/// Replaces the editable fields of a vehicle in place.
///
/// # Errors
/// Returns `VehicleNotFound` if the vehicle does not exist, or a database error.
#[instrument(skip(db))]
pub async fn update_vehicle(
    db: &DatabaseConnection,
    vehicle_id: i64,
    changes: NewVehicle,
) -> Result<vehicle::Model> {
    let mut vehicle: vehicle::ActiveModel = Vehicle::find_by_id(vehicle_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::VehicleNotFound {
            id: vehicle_id.to_string(),
        })?
        .into();

    vehicle.model = Set(changes.model);
    vehicle.plate = Set(changes.plate);
    vehicle.brand = Set(changes.brand);
    vehicle.category = Set(changes.category);
    vehicle.notes = Set(changes.notes);

    vehicle.update(db).await.map_err(Into::into)
}

/// Retrieves a vehicle by id.
pub async fn get_vehicle_by_id(
    db: &DatabaseConnection,
    vehicle_id: i64,
) -> Result<Option<vehicle::Model>> {
    Vehicle::find_by_id(vehicle_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a customer's vehicles in the order they were added.
pub async fn list_vehicles_for_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Vec<vehicle::Model>> {
    Vehicle::find()
        .filter(vehicle::Column::CustomerId.eq(customer_id))
        .order_by_asc(vehicle::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_new_vehicle_defaults() {
        let vehicle = NewVehicle::new(" CB 500 ", Some(" abc1d23 "), None, None, Some(" ")).unwrap();
        assert_eq!(vehicle.model, "CB 500");
        assert_eq!(vehicle.plate.as_deref(), Some("ABC1D23"));
        assert_eq!(vehicle.category, DEFAULT_CATEGORY);
        assert_eq!(vehicle.notes, None);

        let result = NewVehicle::new("", None, None, None, None);
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_add_vehicle() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ana", "1111").await?;

        let vehicle = add_vehicle(
            &db,
            customer.id,
            NewVehicle::new("Ninja 400", None, Some("Kawasaki"), Some("Sport"), None)?,
        )
        .await?;

        assert_eq!(vehicle.category, "Sport");
        let vehicles = list_vehicles_for_customer(&db, customer.id).await?;
        assert_eq!(vehicles, vec![vehicle]);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_vehicle_unknown_customer() -> Result<()> {
        let db = setup_test_db().await?;

        let result = add_vehicle(&db, 999, NewVehicle::new("XJ6", None, None, None, None)?).await;
        assert!(matches!(result, Err(Error::CustomerNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_vehicle_in_place() -> Result<()> {
        let (db, _customer, vehicle) = setup_with_vehicle().await?;

        let updated = update_vehicle(
            &db,
            vehicle.id,
            NewVehicle::new("MT-09", Some("XYZ9876"), Some("Yamaha"), Some("Naked"), None)?,
        )
        .await?;

        assert_eq!(updated.id, vehicle.id);
        assert_eq!(updated.model, "MT-09");
        let reloaded = get_vehicle_by_id(&db, vehicle.id).await?.unwrap();
        assert_eq!(reloaded.plate.as_deref(), Some("XYZ9876"));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_vehicle_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_vehicle(&db, 7, NewVehicle::new("XJ6", None, None, None, None)?).await;
        assert!(matches!(result, Err(Error::VehicleNotFound { .. })));
        Ok(())
    }
}
