//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface the shop operator uses: slash
//! commands that parse input, call into `core`, and reply with a severity-tagged
//! notice. No business rules live here.

/// Discord command implementations (customers, appointments, inventory, pricing, reports)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::operators,
    core::{customer as core_customer, notice::Notice},
    entities::customer,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use tracing::{error, info, instrument, warn};

/// Shared data available to all bot commands.
/// This structure holds the database connection and any other global state
/// that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Discord user IDs allowed to run commands (empty means everyone)
    pub operators: HashSet<String>,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection
    /// and operator allow-list.
    #[must_use]
    pub const fn new(database: DatabaseConnection, operators: HashSet<String>) -> Self {
        Self {
            database,
            operators,
        }
    }
}

/// Poise context carrying [`BotData`].
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Replies with a notice, icon included.
pub async fn send_notice(ctx: Context<'_>, notice: Notice) -> Result<()> {
    ctx.say(notice.to_string()).await?;
    Ok(())
}

/// Looks up a customer by phone, failing with `CustomerNotFound`.
pub async fn require_customer(ctx: Context<'_>, phone: &str) -> Result<customer::Model> {
    core_customer::get_customer_by_phone(&ctx.data().database, phone)
        .await?
        .ok_or_else(|| Error::CustomerNotFound {
            id: phone.trim().to_string(),
        })
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            match &error {
                Error::Database(_) | Error::Io(_) | Error::FrameworkError(_) | Error::EnvVar(_) => {
                    error!("Error in command `{}`: {:?}", ctx.command().name, error);
                }
                _ => info!("Command `{}` rejected: {}", ctx.command().name, error),
            }
            if let Err(e) = ctx.say(Notice::from_error(&error).to_string()).await {
                error!("Failed to send error message: {}", e);
            }
        }
        poise::FrameworkError::CommandCheckFailed { ctx, .. } => {
            warn!("Rejected command from non-operator {}", ctx.author().id);
            if let Err(e) = ctx
                .say(Notice::error("Only shop operators can use this bot.").to_string())
                .await
            {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Every command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::customer(),
        commands::appointment(),
        commands::product(),
        commands::price(),
        commands::report(),
    ]
}

/// Connects to Discord and serves commands until the client stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            command_check: Some(|ctx| {
                Box::pin(async move {
                    Ok(operators::is_operator(
                        &ctx.data().operators,
                        &ctx.author().id.to_string(),
                    ))
                })
            }),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}
