//! Report generation business logic.
//!
//! Everything here is read-only: summaries are derived by scanning completed
//! appointments, nothing is stored. All functions return structured data that
//! the bot layer formats.

use crate::{
    entities::{Appointment, AppointmentStatus, Customer, appointment, customer},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};
use std::collections::HashMap;

/// Revenue, cost and profit over all completed appointments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialSummary {
    /// Number of completed appointments
    pub completed_count: usize,
    /// Sum of charged prices
    pub revenue: f64,
    /// Sum of product costs
    pub product_cost: f64,
    /// Sum of extra expenses
    pub extra_expenses: f64,
    /// Revenue minus product cost
    pub profit: f64,
    /// Profit minus extra expenses
    pub net_profit: f64,
    /// Revenue per completed appointment, zero when there are none
    pub average_ticket: f64,
}

impl FinancialSummary {
    /// Builds the summary from a set of completed appointments.
    #[must_use]
    pub fn from_completed(completed: &[appointment::Model]) -> Self {
        let revenue: f64 = completed.iter().map(|a| a.charged_price).sum();
        let product_cost: f64 = completed.iter().map(|a| a.product_cost).sum();
        let extra_expenses: f64 = completed.iter().map(|a| a.extra_expenses).sum();
        let profit = revenue - product_cost;

        Self {
            completed_count: completed.len(),
            revenue,
            product_cost,
            extra_expenses,
            profit,
            net_profit: profit - extra_expenses,
            average_ticket: average(revenue, completed.len()),
        }
    }
}

/// One customer's lifetime value.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRanking {
    /// The customer
    pub customer: customer::Model,
    /// Completed washes
    pub completed_washes: usize,
    /// Sum of charged prices over completed washes
    pub total_spent: f64,
}

#[allow(clippy::cast_precision_loss)]
fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    // Cast safety: appointment counts are far below 2^52
    total / count as f64
}

/// All completed appointments, oldest booking first.
pub async fn completed_appointments(db: &DatabaseConnection) -> Result<Vec<appointment::Model>> {
    Appointment::find()
        .filter(appointment::Column::Status.eq(AppointmentStatus::Completed))
        .order_by_asc(appointment::Column::ScheduledAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Revenue, cost, profit and average ticket across completed appointments.
pub async fn financial_summary(db: &DatabaseConnection) -> Result<FinancialSummary> {
    let completed = completed_appointments(db).await?;
    Ok(FinancialSummary::from_completed(&completed))
}

/// Every customer with their completed wash count and total spent, biggest
/// spenders first.
pub async fn customer_rankings(db: &DatabaseConnection) -> Result<Vec<CustomerRanking>> {
    let customers = Customer::find().all(db).await?;
    let completed = completed_appointments(db).await?;

    let mut totals: HashMap<i64, (usize, f64)> = HashMap::new();
    for wash in &completed {
        let entry = totals.entry(wash.customer_id).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += wash.charged_price;
    }

    let mut rankings: Vec<CustomerRanking> = customers
        .into_iter()
        .map(|customer| {
            let (completed_washes, total_spent) =
                totals.get(&customer.id).copied().unwrap_or((0, 0.0));
            CustomerRanking {
                customer,
                completed_washes,
                total_spent,
            }
        })
        .collect();

    rankings.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    Ok(rankings)
}

/// Formats an amount in the shop's currency, e.g. `R$ 90.00`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-R$ {:.2}", amount.abs())
    } else {
        format!("R$ {amount:.2}")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::appointment::{cancel_appointment, complete_appointment, record_extra_expenses};
    use crate::test_utils::*;

    #[test]
    fn test_summary_of_nothing_is_zero() {
        let summary = FinancialSummary::from_completed(&[]);
        assert_eq!(summary, FinancialSummary::default());
        assert_eq!(summary.average_ticket, 0.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(90.0), "R$ 90.00");
        assert_eq!(format_currency(1.005), "R$ 1.00");
        assert_eq!(format_currency(-12.5), "-R$ 12.50");
    }

    #[tokio::test]
    async fn test_financial_summary_counts_only_completed() -> Result<()> {
        let (db, customer, vehicle) = setup_with_vehicle().await?;
        create_custom_product(&db, "Shampoo", 100.0, 50.0, 500.0, 10.0).await?;

        let first = create_test_appointment(&db, customer.id, vehicle.id, 100.0).await?;
        let second = create_test_appointment(&db, customer.id, vehicle.id, 50.0).await?;
        let cancelled = create_test_appointment(&db, customer.id, vehicle.id, 500.0).await?;
        create_test_appointment(&db, customer.id, vehicle.id, 300.0).await?;

        complete_appointment(&db, first.id, None).await?;
        complete_appointment(&db, second.id, None).await?;
        record_extra_expenses(&db, second.id, 5.0).await?;
        cancel_appointment(&db, cancelled.id).await?;

        let summary = financial_summary(&db).await?;
        assert_eq!(summary.completed_count, 2);
        assert_eq!(summary.revenue, 150.0);
        assert_eq!(summary.product_cost, 2.0);
        assert_eq!(summary.profit, 148.0);
        assert_eq!(summary.extra_expenses, 5.0);
        assert_eq!(summary.net_profit, 143.0);
        assert_eq!(summary.average_ticket, 75.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_customer_rankings_sorted_by_spend() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_customer(&db, "Ana", "1111").await?;
        let ana_bike = create_test_vehicle(&db, ana.id).await?;
        let bia = create_test_customer(&db, "Bia", "2222").await?;
        let bia_bike = create_test_vehicle(&db, bia.id).await?;
        let idle = create_test_customer(&db, "Caio", "3333").await?;

        let wash = create_test_appointment(&db, ana.id, ana_bike.id, 50.0).await?;
        complete_appointment(&db, wash.id, None).await?;
        for price in [70.0, 120.0] {
            let wash = create_test_appointment(&db, bia.id, bia_bike.id, price).await?;
            complete_appointment(&db, wash.id, None).await?;
        }

        let rankings = customer_rankings(&db).await?;
        assert_eq!(rankings.len(), 3);
        assert_eq!(rankings[0].customer.id, bia.id);
        assert_eq!(rankings[0].completed_washes, 2);
        assert_eq!(rankings[0].total_spent, 190.0);
        assert_eq!(rankings[1].customer.id, ana.id);
        assert_eq!(rankings[2].customer.id, idle.id);
        assert_eq!(rankings[2].completed_washes, 0);
        Ok(())
    }
}
