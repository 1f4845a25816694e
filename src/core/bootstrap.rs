//! Startup seeding - Fills an empty price list and inventory from the catalog.
//!
//! Runs once from `main` after the tables exist. Each table is seeded only
//! while it is empty, so calling it again is harmless.

use crate::{
    config::catalog::Config,
    core::{
        inventory::{self, NewProduct},
        pricing::{self, NewService},
    },
    entities::{Product, Service},
    errors::Result,
};
use sea_orm::{PaginatorTrait, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// What a bootstrap run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Services inserted
    pub services: usize,
    /// Products inserted
    pub products: usize,
}

/// Seeds services and products into empty tables, in one transaction.
///
/// # Errors
/// Returns an error if a catalog entry is invalid or a database operation fails;
/// in that case nothing is inserted.
#[instrument(skip_all)]
pub async fn seed_catalog(db: &DatabaseConnection, config: &Config) -> Result<SeedReport> {
    let txn = db.begin().await?;
    let mut report = SeedReport::default();

    if Service::find().count(&txn).await? == 0 {
        for entry in &config.services {
            let service = NewService::new(&entry.category, &entry.name, entry.price)?;
            pricing::create_service(&txn, service).await?;
            report.services += 1;
        }
    }

    if Product::find().count(&txn).await? == 0 {
        for entry in &config.products {
            let product = NewProduct::new(
                &entry.name,
                &entry.unit,
                entry.stock,
                entry.purchase_cost,
                entry.purchase_quantity,
                entry.usage_per_wash,
                Some(entry.reorder_point),
            )?;
            inventory::register_product(&txn, product).await?;
            report.products += 1;
        }
    }

    txn.commit().await?;

    if report != SeedReport::default() {
        info!(
            services = report.services,
            products = report.products,
            "Seeded default catalog"
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::catalog::{ProductConfig, ServiceConfig, default_services};
    use crate::core::pricing::list_by_category;
    use crate::test_utils::*;

    fn catalog() -> Config {
        Config {
            services: default_services(),
            products: vec![ProductConfig {
                name: "Shampoo".to_string(),
                unit: "ml".to_string(),
                stock: 1000.0,
                purchase_cost: 50.0,
                purchase_quantity: 500.0,
                usage_per_wash: 10.0,
                reorder_point: 100.0,
            }],
        }
    }

    #[tokio::test]
    async fn test_seed_catalog_on_empty_store() -> Result<()> {
        let db = setup_test_db().await?;

        let report = seed_catalog(&db, &catalog()).await?;

        assert_eq!(report, SeedReport { services: 8, products: 1 });
        assert_eq!(list_by_category(&db).await?.len(), 8);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        seed_catalog(&db, &catalog()).await?;

        let second = seed_catalog(&db, &catalog()).await?;

        assert_eq!(second, SeedReport::default());
        assert_eq!(list_by_category(&db).await?.len(), 8);
        assert_eq!(inventory::list_products(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_skips_non_empty_tables() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_service(&db, "Naked", "House Special", 65.0).await?;

        let report = seed_catalog(&db, &catalog()).await?;

        assert_eq!(report.services, 0);
        assert_eq!(report.products, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_seed_entry_inserts_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let mut config = catalog();
        config.services.push(ServiceConfig {
            category: "Sport".to_string(),
            name: "Broken".to_string(),
            price: -1.0,
        });

        assert!(seed_catalog(&db, &config).await.is_err());
        assert!(list_by_category(&db).await?.is_empty());
        Ok(())
    }
}
