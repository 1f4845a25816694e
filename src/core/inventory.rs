//! Inventory ledger - Product registration, stock alerts and per-wash depletion.
//!
//! The depletion pass walks every product once, subtracting the mean
//! consumption from any product that still has enough stock and adding that
//! product's cost-per-dose to the wash's total. A product that is short is
//! skipped without error: stock never goes negative and nothing is backordered.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use tracing::{debug, info, instrument, warn};

/// Reorder threshold used when none is given.
pub const DEFAULT_REORDER_POINT: f64 = 10.0;

/// Validated input for registering a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Product name
    pub name: String,
    /// Unit of measure
    pub unit: String,
    /// Stock on hand
    pub stock: f64,
    /// Cost of one purchase
    pub purchase_cost: f64,
    /// Units per purchase
    pub purchase_quantity: f64,
    /// Mean units used by one wash
    pub usage_per_wash: f64,
    /// Reorder threshold
    pub reorder_point: f64,
}

impl NewProduct {
    /// Validates names and quantities.
    ///
    /// # Errors
    /// Returns `InvalidInput` for a blank name or unit and `InvalidAmount` for
    /// any quantity that is negative, NaN or infinite.
    pub fn new(
        name: &str,
        unit: &str,
        stock: f64,
        purchase_cost: f64,
        purchase_quantity: f64,
        usage_per_wash: f64,
        reorder_point: Option<f64>,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput {
                message: "Product name cannot be empty".to_string(),
            });
        }
        let unit = unit.trim();
        if unit.is_empty() {
            return Err(Error::InvalidInput {
                message: "Unit of measure cannot be empty".to_string(),
            });
        }

        let reorder_point = reorder_point.unwrap_or(DEFAULT_REORDER_POINT);
        for amount in [
            stock,
            purchase_cost,
            purchase_quantity,
            usage_per_wash,
            reorder_point,
        ] {
            validate_quantity(amount)?;
        }

        Ok(Self {
            name: name.to_string(),
            unit: unit.to_string(),
            stock,
            purchase_cost,
            purchase_quantity,
            usage_per_wash,
            reorder_point,
        })
    }
}

fn validate_quantity(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Registers a product.
///
/// # Errors
/// Returns an error if the database insert fails.
#[instrument(skip(db), fields(name = %new_product.name))]
pub async fn register_product<C>(db: &C, new_product: NewProduct) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let product = product::ActiveModel {
        name: Set(new_product.name),
        unit: Set(new_product.unit),
        stock: Set(new_product.stock),
        purchase_cost: Set(new_product.purchase_cost),
        purchase_quantity: Set(new_product.purchase_quantity),
        usage_per_wash: Set(new_product.usage_per_wash),
        reorder_point: Set(new_product.reorder_point),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(product_id = product.id, "Product registered");
    Ok(product)
}

/// Lists every product, ordered by name.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by id.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by its exact name.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Products whose stock is at or below their reorder point.
pub async fn low_stock_alerts(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(Expr::col(product::Column::Stock).lte(Expr::col(product::Column::ReorderPoint)))
        .order_by_asc(product::Column::Stock)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds purchased units to a product's stock.
///
/// # Errors
/// Returns `InvalidAmount` for a non-positive or non-finite quantity and
/// `ProductNotFound` if the product does not exist.
#[instrument(skip(db))]
pub async fn restock_product(
    db: &DatabaseConnection,
    product_id: i64,
    quantity: f64,
) -> Result<product::Model> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(Error::InvalidAmount { amount: quantity });
    }

    let result = Product::update_many()
        .col_expr(
            product::Column::Stock,
            Expr::col(product::Column::Stock).add(quantity),
        )
        .filter(product::Column::Id.eq(product_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound {
            name: product_id.to_string(),
        });
    }

    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })
}

/// Consumes one wash's worth of every product that has enough stock.
///
/// Returns the summed cost-per-dose of the products actually consumed. Each
/// product is handled independently: a short product is skipped and the rest
/// are still depleted.
#[instrument(skip(db))]
pub async fn deplete_for_wash<C>(db: &C) -> Result<f64>
where
    C: ConnectionTrait,
{
    let products = Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;

    let mut total_cost = 0.0;
    for item in products {
        if !item.can_supply_wash() {
            warn!(
                product = %item.name,
                stock = item.stock,
                needed = item.usage_per_wash,
                "Insufficient stock, skipping product for this wash"
            );
            continue;
        }

        let dose_cost = item.cost_per_dose();
        let new_stock = item.stock - item.usage_per_wash;
        let mut active: product::ActiveModel = item.into();
        active.stock = Set(new_stock);
        active.update(db).await?;

        total_cost += dose_cost;
    }

    debug!(total_cost, "Depletion pass finished");
    Ok(total_cost)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_new_product_validation() {
        let result = NewProduct::new("", "ml", 1.0, 1.0, 1.0, 1.0, None);
        assert!(matches!(result, Err(Error::InvalidInput { .. })));

        let result = NewProduct::new("Wax", " ", 1.0, 1.0, 1.0, 1.0, None);
        assert!(matches!(result, Err(Error::InvalidInput { .. })));

        let result = NewProduct::new("Wax", "g", -1.0, 1.0, 1.0, 1.0, None);
        assert!(matches!(result, Err(Error::InvalidAmount { amount: -1.0 })));

        let result = NewProduct::new("Wax", "g", 1.0, f64::NAN, 1.0, 1.0, None);
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let product = NewProduct::new("Wax", "g", 1.0, 1.0, 1.0, 1.0, None).unwrap();
        assert_eq!(product.reorder_point, DEFAULT_REORDER_POINT);
    }

    #[tokio::test]
    async fn test_shampoo_wash_depletes_stock_and_costs_one() -> Result<()> {
        let db = setup_test_db().await?;
        let shampoo = create_custom_product(&db, "Shampoo", 100.0, 50.0, 500.0, 10.0).await?;

        let cost = deplete_for_wash(&db).await?;

        assert_eq!(cost, 1.0);
        let shampoo = get_product_by_id(&db, shampoo.id).await?.unwrap();
        assert_eq!(shampoo.stock, 90.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_is_skipped() -> Result<()> {
        let db = setup_test_db().await?;
        let shampoo = create_custom_product(&db, "Shampoo", 100.0, 50.0, 500.0, 10.0).await?;
        let wax = create_custom_product(&db, "Wax", 5.0, 80.0, 200.0, 8.0).await?;

        let cost = deplete_for_wash(&db).await?;

        // Only the shampoo contributes
        assert_eq!(cost, 1.0);
        let wax = get_product_by_id(&db, wax.id).await?.unwrap();
        assert_eq!(wax.stock, 5.0);
        let shampoo = get_product_by_id(&db, shampoo.id).await?.unwrap();
        assert_eq!(shampoo.stock, 90.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_stock_never_goes_negative() -> Result<()> {
        let db = setup_test_db().await?;
        let polish = create_custom_product(&db, "Polish", 25.0, 10.0, 100.0, 10.0).await?;

        for _ in 0..5 {
            deplete_for_wash(&db).await?;
        }

        let polish = get_product_by_id(&db, polish.id).await?.unwrap();
        assert_eq!(polish.stock, 5.0);
        assert!(polish.stock >= 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_purchase_quantity_costs_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let freebie = create_custom_product(&db, "Sample", 50.0, 30.0, 0.0, 5.0).await?;

        let cost = deplete_for_wash(&db).await?;

        assert_eq!(cost, 0.0);
        let freebie = get_product_by_id(&db, freebie.id).await?.unwrap();
        assert_eq!(freebie.stock, 45.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_low_stock_alerts() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_product(&db, "Shampoo", 100.0, 50.0, 500.0, 10.0).await?;
        let wax = create_custom_product(&db, "Wax", 10.0, 80.0, 200.0, 8.0).await?;
        let degreaser = create_custom_product(&db, "Degreaser", 3.0, 40.0, 1000.0, 20.0).await?;

        let alerts = low_stock_alerts(&db).await?;

        let ids: Vec<i64> = alerts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![degreaser.id, wax.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_restock_product() -> Result<()> {
        let db = setup_test_db().await?;
        let wax = create_custom_product(&db, "Wax", 10.0, 80.0, 200.0, 8.0).await?;

        let wax = restock_product(&db, wax.id, 200.0).await?;
        assert_eq!(wax.stock, 210.0);

        let result = restock_product(&db, wax.id, 0.0).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = restock_product(&db, 999, 5.0).await;
        assert!(matches!(result, Err(Error::ProductNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_products_ordered_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_product(&db, "Wax", 10.0, 80.0, 200.0, 8.0).await?;
        create_custom_product(&db, "Degreaser", 3.0, 40.0, 1000.0, 20.0).await?;

        let names: Vec<String> = list_products(&db).await?.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Degreaser".to_string(), "Wax".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_product_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        let wax = create_custom_product(&db, "Wax", 10.0, 80.0, 200.0, 8.0).await?;

        let found = get_product_by_name(&db, " Wax ").await?;
        assert_eq!(found.map(|p| p.id), Some(wax.id));
        assert!(get_product_by_name(&db, "Polish").await?.is_none());
        Ok(())
    }
}
