//! Discount ledger - Referral credits held on the customer row.
//!
//! There is no separate ledger table: `customers.discount_credits` is the
//! ledger. Every mutation is a single `UPDATE ... SET discount_credits =
//! discount_credits +/- n` so it composes with whatever transaction the caller
//! passes in, and consumption is conditional on a positive balance so the count
//! can never go below zero.

use crate::{
    entities::{Customer, customer},
    errors::{Error, Result},
};
use sea_orm::{prelude::*, sea_query::Expr};
use tracing::{debug, instrument};

/// Price multiplier applied when a credit is consumed (10% off).
pub const DISCOUNT_FACTOR: f64 = 0.90;

/// Adds `n` credits to a customer.
///
/// # Errors
/// Returns `CustomerNotFound` if no row was updated.
#[instrument(skip(db))]
pub async fn grant<C>(db: &C, customer_id: i64, n: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    add_credits(db, customer_id, n).await?;
    debug!("Granted {n} discount credit(s)");
    Ok(())
}

/// Returns `n` previously consumed credits to a customer.
///
/// Identical to [`grant`] at the storage level; kept separate so call sites
/// read as what they mean.
///
/// # Errors
/// Returns `CustomerNotFound` if no row was updated.
#[instrument(skip(db))]
pub async fn refund<C>(db: &C, customer_id: i64, n: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    add_credits(db, customer_id, n).await?;
    debug!("Refunded {n} discount credit(s)");
    Ok(())
}

/// Spends one credit if the customer has any.
///
/// Returns `true` and decrements the balance when at least one credit was
/// available, `false` (and leaves the row untouched) otherwise.
#[instrument(skip(db))]
pub async fn consume_if_available<C>(db: &C, customer_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Customer::update_many()
        .col_expr(
            customer::Column::DiscountCredits,
            Expr::col(customer::Column::DiscountCredits).sub(1),
        )
        .filter(customer::Column::Id.eq(customer_id))
        .filter(customer::Column::DiscountCredits.gte(1))
        .exec(db)
        .await?;

    let consumed = result.rows_affected == 1;
    debug!(consumed, "Discount credit consumption attempted");
    Ok(consumed)
}

/// Current credit balance for a customer.
pub async fn balance<C>(db: &C, customer_id: i64) -> Result<i32>
where
    C: ConnectionTrait,
{
    Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .map(|c| c.discount_credits)
        .ok_or_else(|| Error::CustomerNotFound {
            id: customer_id.to_string(),
        })
}

/// Applies the referral discount to a price, rounded to cents.
#[must_use]
pub fn apply_discount(price: f64) -> f64 {
    (price * DISCOUNT_FACTOR * 100.0).round() / 100.0
}

async fn add_credits<C>(db: &C, customer_id: i64, n: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    if n < 0 {
        return Err(Error::InvalidInput {
            message: format!("Credit adjustments must be non-negative, got {n}"),
        });
    }

    let result = Customer::update_many()
        .col_expr(
            customer::Column::DiscountCredits,
            Expr::col(customer::Column::DiscountCredits).add(n),
        )
        .filter(customer::Column::Id.eq(customer_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::CustomerNotFound {
            id: customer_id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_apply_discount_rounds_to_cents() {
        assert_eq!(apply_discount(100.0), 90.0);
        assert_eq!(apply_discount(50.0), 45.0);
        assert_eq!(apply_discount(33.33), 30.0);
        assert_eq!(apply_discount(0.0), 0.0);
    }

    #[tokio::test]
    async fn test_grant_and_balance() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ana", "1111").await?;

        grant(&db, customer.id, 1).await?;
        grant(&db, customer.id, 2).await?;

        assert_eq!(balance(&db, customer.id).await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_consume_if_available() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ana", "1111").await?;
        grant(&db, customer.id, 1).await?;

        assert!(consume_if_available(&db, customer.id).await?);
        assert_eq!(balance(&db, customer.id).await?, 0);

        // Nothing left: no-op, never negative
        assert!(!consume_if_available(&db, customer.id).await?);
        assert_eq!(balance(&db, customer.id).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_refund_restores_credit() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ana", "1111").await?;
        grant(&db, customer.id, 1).await?;
        consume_if_available(&db, customer.id).await?;

        refund(&db, customer.id, 1).await?;
        assert_eq!(balance(&db, customer.id).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_grant_unknown_customer() -> Result<()> {
        let db = setup_test_db().await?;

        let result = grant(&db, 999, 1).await;
        assert!(matches!(result, Err(Error::CustomerNotFound { .. })));

        assert!(!consume_if_available(&db, 999).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_negative_adjustment_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ana", "1111").await?;

        let result = refund(&db, customer.id, -1).await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
        assert_eq!(balance(&db, customer.id).await?, 0);
        Ok(())
    }
}
