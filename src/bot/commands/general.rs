//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**DetailBuddy Help**\n\
        Commands for running the detailing shop.\n\n\
        **Customers**\n\
        • `/customer register <name> <phone> <model> [plate] [brand] [category] [address] [referrer_phone]`\n\
        • `/customer info <phone>` - Vehicles, credits and recent appointments.\n\
        • `/customer list` - All customers.\n\
        • `/customer vehicle_add` / `vehicle_edit` - Manage vehicles.\n\n\
        **Appointments**\n\
        • `/appointment schedule <phone> <date> <time> <service> [vehicle_id] [price]`\n\
        • `/appointment start|finish <id> [time]` - Move through the workflow.\n\
        • `/appointment cancel|delete <id>` - Unused discount credits are returned.\n\
        • `/appointment reschedule|expenses|attach|upcoming`\n\n\
        **Catalog & Stock**\n\
        • `/price list` / `/price update <service> <value>`\n\
        • `/product add|list|alerts|restock`\n\n\
        **Reports**\n\
        • `/report` - Revenue, costs, profit and top customers.\n\n\
        Customers referred by someone give their referrer 10% off the next wash \
        once their first wash is completed.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
