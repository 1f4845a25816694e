//! Financial report command.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::report::{self, format_currency},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// How many customers the ranking shows.
    const TOP_CUSTOMERS: usize = 5;

    /// Shows revenue, costs and profit over completed washes, plus top customers.
    #[poise::command(slash_command)]
    pub async fn report(ctx: Context<'_>) -> Result<()> {
        let db = &ctx.data().database;
        let summary = report::financial_summary(db).await?;
        let rankings = report::customer_rankings(db).await?;

        let top = if rankings.is_empty() {
            "No completed washes yet".to_string()
        } else {
            rankings
                .iter()
                .take(TOP_CUSTOMERS)
                .enumerate()
                .map(|(i, r)| {
                    format!(
                        "{}. {} - {} wash(es), {}",
                        i + 1,
                        r.customer.name,
                        r.completed_washes,
                        format_currency(r.total_spent)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let embed = serenity::CreateEmbed::default()
            .title("📊 Financial Report")
            .color(0x0058_65F2)
            .fields(vec![
                (
                    "Completed washes".to_string(),
                    summary.completed_count.to_string(),
                    true,
                ),
                ("Revenue".to_string(), format_currency(summary.revenue), true),
                (
                    "Average ticket".to_string(),
                    format_currency(summary.average_ticket),
                    true,
                ),
                (
                    "Product cost".to_string(),
                    format_currency(summary.product_cost),
                    true,
                ),
                (
                    "Extra expenses".to_string(),
                    format_currency(summary.extra_expenses),
                    true,
                ),
                ("Profit".to_string(), format_currency(summary.profit), true),
                (
                    "Net profit".to_string(),
                    format_currency(summary.net_profit),
                    true,
                ),
                ("Top customers".to_string(), top, false),
            ]);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
