#![allow(clippy::result_large_err)]

use detail_buddy::{
    bot::{self, BotData},
    config::{catalog, database, operators},
    core::bootstrap,
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Seed catalog from config.toml, or the built-in price list
    let config = catalog::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {}", e))?;

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed services and products on a fresh database
    bootstrap::seed_catalog(&db, &config)
        .await
        .inspect(|report| {
            info!(
                "Catalog seeded: {} service(s), {} product(s).",
                report.services, report.products
            );
        })
        .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;

    let operator_ids = operators::get_operator_ids();
    if operator_ids.is_empty() {
        warn!("OPERATOR_USER_IDS is not set; every Discord user can run commands.");
    }

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(db, operator_ids)).await
}
