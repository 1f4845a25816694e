//! Product commands - register supplies, check stock and restock.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete::autocomplete_product_name, send_notice},
        core::{
            inventory::{self, NewProduct},
            notice::Notice,
            report::format_currency,
        },
        entities::product,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    fn stock_line(p: &product::Model) -> String {
        format!(
            "{:.1} {} (uses {:.1}/wash, {} per wash)",
            p.stock,
            p.unit,
            p.usage_per_wash,
            format_currency(p.cost_per_dose())
        )
    }

    /// Product management commands.
    #[poise::command(
        slash_command,
        subcommands("product_add", "product_list", "product_alerts", "product_restock")
    )]
    #[allow(clippy::unused_async)]
    pub async fn product(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Registers a supply consumed on every wash.
    #[poise::command(slash_command, rename = "add")]
    #[allow(clippy::too_many_arguments)]
    pub async fn product_add(
        ctx: Context<'_>,
        #[description = "Product name"] name: String,
        #[description = "Unit of measure (ml, g, un)"] unit: String,
        #[description = "Current stock"] stock: f64,
        #[description = "Price paid for one purchase"] purchase_cost: f64,
        #[description = "Quantity in one purchase"] purchase_quantity: f64,
        #[description = "Average quantity used per wash"] usage_per_wash: f64,
        #[description = "Alert when stock falls to this level"] reorder_point: Option<f64>,
    ) -> Result<()> {
        let new_product = NewProduct::new(
            &name,
            &unit,
            stock,
            purchase_cost,
            purchase_quantity,
            usage_per_wash,
            reorder_point,
        )?;
        let created = inventory::register_product(&ctx.data().database, new_product).await?;
        send_notice(
            ctx,
            Notice::success(format!(
                "Product **{}** added: {}.",
                created.name,
                stock_line(&created)
            )),
        )
        .await
    }

    /// Shows every product with its stock level.
    #[poise::command(slash_command, rename = "list")]
    pub async fn product_list(ctx: Context<'_>) -> Result<()> {
        let products = inventory::list_products(&ctx.data().database).await?;
        if products.is_empty() {
            return send_notice(ctx, Notice::info("No products registered yet.")).await;
        }

        let fields: Vec<(String, String, bool)> = products
            .iter()
            .map(|p| {
                let flag = if p.needs_reorder() { "⚠️ " } else { "" };
                (format!("{flag}{}", p.name), stock_line(p), false)
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title("🧴 Products")
            .color(0x0058_65F2)
            .fields(fields);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Lists products at or below their reorder point.
    #[poise::command(slash_command, rename = "alerts")]
    pub async fn product_alerts(ctx: Context<'_>) -> Result<()> {
        let low = inventory::low_stock_alerts(&ctx.data().database).await?;
        if low.is_empty() {
            return send_notice(ctx, Notice::info("All products are above their reorder point."))
                .await;
        }

        let lines = low
            .iter()
            .map(|p| format!("• **{}** - {:.1} {} left", p.name, p.stock, p.unit))
            .collect::<Vec<_>>()
            .join("\n");
        ctx.say(format!("⚠️ **Low stock**\n{lines}")).await?;
        Ok(())
    }

    /// Adds purchased units to a product.
    #[poise::command(slash_command, rename = "restock")]
    pub async fn product_restock(
        ctx: Context<'_>,
        #[description = "Product name"]
        #[autocomplete = "autocomplete_product_name"]
        name: String,
        #[description = "Quantity added"] quantity: f64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let found = inventory::get_product_by_name(db, &name)
            .await?
            .ok_or_else(|| Error::ProductNotFound { name: name.clone() })?;

        let restocked = inventory::restock_product(db, found.id, quantity).await?;
        send_notice(
            ctx,
            Notice::success(format!(
                "{} restocked: {:.1} {} on hand.",
                restocked.name, restocked.stock, restocked.unit
            )),
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
