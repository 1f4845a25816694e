//! Product entity - Cleaning supplies consumed by each wash.
//!
//! Each product tracks its current stock, what a purchase costs, how much of
//! it a single wash uses on average, and the level at which it should be
//! reordered.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Shampoo", "Wax")
    pub name: String,
    /// Unit of measure (e.g., "ml", "g", "un")
    pub unit: String,
    /// Current stock, in `unit`
    pub stock: f64,
    /// Price paid for one purchase of `purchase_quantity` units
    pub purchase_cost: f64,
    /// Units received per purchase
    pub purchase_quantity: f64,
    /// Mean units consumed by one wash
    pub usage_per_wash: f64,
    /// Stock level at or below which the product should be reordered
    pub reorder_point: f64,
}

impl Model {
    /// Cost of the amount one wash consumes.
    ///
    /// Zero when the purchase quantity is not positive, so a product registered
    /// without purchase data never divides by zero.
    #[must_use]
    pub fn cost_per_dose(&self) -> f64 {
        if self.purchase_quantity > 0.0 {
            (self.purchase_cost / self.purchase_quantity) * self.usage_per_wash
        } else {
            0.0
        }
    }

    /// Whether enough stock remains for one more wash.
    #[must_use]
    pub fn can_supply_wash(&self) -> bool {
        self.stock >= self.usage_per_wash
    }

    /// Whether the stock has reached the reorder point.
    #[must_use]
    pub fn needs_reorder(&self) -> bool {
        self.stock <= self.reorder_point
    }
}

/// `Product` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn shampoo() -> Model {
        Model {
            id: 1,
            name: "Shampoo".to_string(),
            unit: "ml".to_string(),
            stock: 100.0,
            purchase_cost: 50.0,
            purchase_quantity: 500.0,
            usage_per_wash: 10.0,
            reorder_point: 10.0,
        }
    }

    #[test]
    fn test_cost_per_dose() {
        assert_eq!(shampoo().cost_per_dose(), 1.0);
    }

    #[test]
    fn test_cost_per_dose_zero_purchase_quantity() {
        let product = Model {
            purchase_quantity: 0.0,
            ..shampoo()
        };
        assert_eq!(product.cost_per_dose(), 0.0);
    }

    #[test]
    fn test_can_supply_wash_boundary() {
        let exact = Model {
            stock: 10.0,
            ..shampoo()
        };
        assert!(exact.can_supply_wash());

        let short = Model {
            stock: 9.5,
            ..shampoo()
        };
        assert!(!short.can_supply_wash());
    }

    #[test]
    fn test_needs_reorder_is_inclusive() {
        let at_threshold = Model {
            stock: 10.0,
            ..shampoo()
        };
        assert!(at_threshold.needs_reorder());
        assert!(!shampoo().needs_reorder());
    }
}
