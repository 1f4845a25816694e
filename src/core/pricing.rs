//! Pricing catalog - The editable list of services and their prices.
//!
//! Appointments copy the price at scheduling time, so updates here only
//! affect appointments scheduled afterwards.

use crate::{
    entities::{Service, service},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Validated input for a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    /// Vehicle category
    pub category: String,
    /// Service name
    pub name: String,
    /// Price
    pub price: f64,
}

impl NewService {
    /// Trims the labels and validates the price.
    ///
    /// # Errors
    /// Returns `InvalidInput` for blank labels and `InvalidAmount` for a
    /// negative or non-finite price.
    pub fn new(category: &str, name: &str, price: f64) -> Result<Self> {
        let category = category.trim();
        let name = name.trim();
        if category.is_empty() || name.is_empty() {
            return Err(Error::InvalidInput {
                message: "Service category and name cannot be empty".to_string(),
            });
        }
        validate_price(price)?;

        Ok(Self {
            category: category.to_string(),
            name: name.to_string(),
            price,
        })
    }
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(())
}

/// Adds a service to the catalog.
pub async fn create_service<C>(db: &C, new_service: NewService) -> Result<service::Model>
where
    C: ConnectionTrait,
{
    service::ActiveModel {
        category: Set(new_service.category),
        name: Set(new_service.name),
        price: Set(new_service.price),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Every service, ordered by category and then by price.
pub async fn list_by_category(db: &DatabaseConnection) -> Result<Vec<service::Model>> {
    Service::find()
        .order_by_asc(service::Column::Category)
        .order_by_asc(service::Column::Price)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The catalog grouped by category, each group ordered by price.
pub async fn price_table(db: &DatabaseConnection) -> Result<BTreeMap<String, Vec<service::Model>>> {
    let mut table: BTreeMap<String, Vec<service::Model>> = BTreeMap::new();
    for entry in list_by_category(db).await? {
        table.entry(entry.category.clone()).or_default().push(entry);
    }
    Ok(table)
}

/// Finds a service by its exact name.
pub async fn get_service_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<service::Model>> {
    Service::find()
        .filter(service::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Changes the price of one service.
///
/// # Errors
/// Returns `InvalidAmount` for a negative or non-finite price and
/// `ServiceNotFound` if no service has this id.
#[instrument(skip(db))]
pub async fn update_price(
    db: &DatabaseConnection,
    service_id: i64,
    new_price: f64,
) -> Result<service::Model> {
    validate_price(new_price)?;

    let mut entry: service::ActiveModel = Service::find_by_id(service_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ServiceNotFound {
            name: service_id.to_string(),
        })?
        .into();

    entry.price = Set(new_price);
    let updated = entry.update(db).await?;

    info!(service = %updated.name, price = updated.price, "Service price updated");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_new_service_validation() {
        assert!(matches!(
            NewService::new(" ", "Standard", 10.0),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            NewService::new("Sport", "Standard", -1.0),
            Err(Error::InvalidAmount { amount: -1.0 })
        ));
        assert!(matches!(
            NewService::new("Sport", "Standard", f64::INFINITY),
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_price_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = update_price(&db, 1, f64::NAN).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = update_price(&db, 1, -5.0).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: -5.0 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_by_category_ordering() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_service(&db, "Sport", "Premium Sport", 120.0).await?;
        create_test_service(&db, "Naked", "Premium Naked", 90.0).await?;
        create_test_service(&db, "Sport", "Standard Sport", 70.0).await?;

        let names: Vec<String> = list_by_category(&db)
            .await?
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Premium Naked", "Standard Sport", "Premium Sport"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_price_table_groups_by_category() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_service(&db, "Sport", "Premium Sport", 120.0).await?;
        create_test_service(&db, "Sport", "Standard Sport", 70.0).await?;
        create_test_service(&db, "Custom", "Standard Custom", 80.0).await?;

        let table = price_table(&db).await?;
        assert_eq!(table.len(), 2);
        assert_eq!(table["Sport"].len(), 2);
        assert_eq!(table["Sport"][0].price, 70.0);
        assert_eq!(table["Custom"][0].name, "Standard Custom");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_price() -> Result<()> {
        let db = setup_test_db().await?;
        let service = create_test_service(&db, "Naked", "Standard Naked", 50.0).await?;

        let updated = update_price(&db, service.id, 55.0).await?;
        assert_eq!(updated.price, 55.0);

        let reloaded = get_service_by_name(&db, "Standard Naked").await?.unwrap();
        assert_eq!(reloaded.price, 55.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_price_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_price(&db, 42, 10.0).await;
        assert!(matches!(result, Err(Error::ServiceNotFound { .. })));
        Ok(())
    }
}
