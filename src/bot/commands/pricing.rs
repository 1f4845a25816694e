//! Price list commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete::autocomplete_service_name, send_notice},
        core::{notice::Notice, pricing, report::format_currency},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Service price list commands.
    #[poise::command(slash_command, subcommands("price_list", "price_update"))]
    #[allow(clippy::unused_async)]
    pub async fn price(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Shows the price table grouped by category.
    #[poise::command(slash_command, rename = "list")]
    pub async fn price_list(ctx: Context<'_>) -> Result<()> {
        let table = pricing::price_table(&ctx.data().database).await?;
        if table.is_empty() {
            return send_notice(ctx, Notice::info("The price list is empty.")).await;
        }

        let fields: Vec<(String, String, bool)> = table
            .into_iter()
            .map(|(category, services)| {
                let lines = services
                    .iter()
                    .map(|s| format!("{}: {}", s.name, format_currency(s.price)))
                    .collect::<Vec<_>>()
                    .join("\n");
                (category, lines, true)
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title("💲 Price list")
            .color(0x0058_65F2)
            .fields(fields);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Changes the price of a service.
    #[poise::command(slash_command, rename = "update")]
    pub async fn price_update(
        ctx: Context<'_>,
        #[description = "Service"]
        #[autocomplete = "autocomplete_service_name"]
        service: String,
        #[description = "New price"] value: f64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let found = pricing::get_service_by_name(db, &service)
            .await?
            .ok_or_else(|| Error::ServiceNotFound {
                name: service.clone(),
            })?;

        let updated = pricing::update_price(db, found.id, value).await?;
        send_notice(
            ctx,
            Notice::success(format!(
                "{} now costs {}.",
                updated.name,
                format_currency(updated.price)
            )),
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
