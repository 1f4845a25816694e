//! Customer and vehicle commands - registration, lookup and the vehicle registry.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, require_customer, send_notice},
        core::{
            appointment,
            customer::{self, NewCustomer},
            notice::Notice,
            report::format_currency,
            vehicle::{self, NewVehicle},
        },
        entities::AppointmentStatus,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Customer management commands.
    #[poise::command(
        slash_command,
        subcommands(
            "customer_register",
            "customer_info",
            "customer_list",
            "customer_vehicle_add",
            "customer_vehicle_edit"
        )
    )]
    #[allow(clippy::unused_async)]
    pub async fn customer(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Registers a customer together with their first vehicle.
    #[poise::command(slash_command, rename = "register")]
    #[allow(clippy::too_many_arguments)]
    pub async fn customer_register(
        ctx: Context<'_>,
        #[description = "Customer name"] name: String,
        #[description = "Phone number (identifies the customer)"] phone: String,
        #[description = "Motorcycle model"] model: String,
        #[description = "License plate"] plate: Option<String>,
        #[description = "Motorcycle brand"] brand: Option<String>,
        #[description = "Service category (Naked, Sport, Custom, BigTrail)"] category: Option<
            String,
        >,
        #[description = "Address"] address: Option<String>,
        #[description = "Phone of the customer who referred them"] referrer_phone: Option<
            String,
        >,
    ) -> Result<()> {
        let referrer_id = match referrer_phone.as_deref() {
            Some(phone) => Some(require_customer(ctx, phone).await?.id),
            None => None,
        };

        let new_customer = NewCustomer::new(&name, &phone, address.as_deref(), referrer_id)?;
        let first_vehicle = NewVehicle::new(
            &model,
            plate.as_deref(),
            brand.as_deref(),
            category.as_deref(),
            None,
        )?;

        let (created, vehicle) =
            customer::register_customer(&ctx.data().database, new_customer, Some(first_vehicle))
                .await?;
        info!(customer_id = created.id, "Customer registered from Discord");

        let mut message = format!("Customer **{}** registered (#{}).", created.name, created.id);
        if let Some(v) = vehicle {
            message.push_str(&format!(" Vehicle #{}: {} ({}).", v.id, v.model, v.category));
        }
        if referrer_id.is_some() {
            message.push_str(" Their referrer earns a discount after the first completed wash.");
        }
        send_notice(ctx, Notice::success(message)).await
    }

    /// Shows a customer's vehicles, discount credits and history.
    #[poise::command(slash_command, rename = "info")]
    pub async fn customer_info(
        ctx: Context<'_>,
        #[description = "Customer phone number"] phone: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let found = require_customer(ctx, &phone).await?;

        let vehicles = vehicle::list_vehicles_for_customer(db, found.id).await?;
        let history = appointment::list_for_customer(db, found.id).await?;
        let referrals = customer::list_referrals(db, found.id).await?;

        let vehicle_lines = if vehicles.is_empty() {
            "No vehicles registered".to_string()
        } else {
            vehicles
                .iter()
                .map(|v| {
                    format!(
                        "#{} {} {} [{}]{}",
                        v.id,
                        v.brand.as_deref().unwrap_or(""),
                        v.model,
                        v.category,
                        v.plate
                            .as_deref()
                            .map(|p| format!(" - {p}"))
                            .unwrap_or_default()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let completed: Vec<_> = history
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .collect();
        let spent: f64 = completed.iter().map(|a| a.charged_price).sum();
        let history_lines = if history.is_empty() {
            "No appointments yet".to_string()
        } else {
            history
                .iter()
                .take(10)
                .map(|a| {
                    format!(
                        "#{} {} - {} - {} ({})",
                        a.id,
                        a.scheduled_at.format("%Y-%m-%d %H:%M"),
                        a.service_type,
                        format_currency(a.charged_price),
                        a.status
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let mut fields = vec![
            ("Phone".to_string(), found.phone.clone(), true),
            (
                "Discount credits".to_string(),
                found.discount_credits.to_string(),
                true,
            ),
            (
                "Completed washes".to_string(),
                format!("{} ({})", completed.len(), format_currency(spent)),
                true,
            ),
            ("Vehicles".to_string(), vehicle_lines, false),
            ("Recent appointments".to_string(), history_lines, false),
        ];
        if let Some(address) = &found.address {
            fields.insert(1, ("Address".to_string(), address.clone(), true));
        }
        if !referrals.is_empty() {
            let names = referrals
                .iter()
                .map(|r| r.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            fields.push(("Referred".to_string(), names, false));
        }

        let embed = serenity::CreateEmbed::default()
            .title(format!("👤 {}", found.name))
            .color(0x0058_65F2)
            .fields(fields);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Lists every registered customer.
    #[poise::command(slash_command, rename = "list")]
    pub async fn customer_list(ctx: Context<'_>) -> Result<()> {
        let customers = customer::list_customers(&ctx.data().database).await?;
        if customers.is_empty() {
            return send_notice(ctx, Notice::info("No customers registered yet.")).await;
        }

        let lines = customers
            .iter()
            .map(|c| {
                let credits = if c.discount_credits > 0 {
                    format!(" 🎟️ {}", c.discount_credits)
                } else {
                    String::new()
                };
                format!("• **{}** - {}{}", c.name, c.phone, credits)
            })
            .collect::<Vec<_>>()
            .join("\n");

        ctx.say(format!("**Customers ({})**\n{lines}", customers.len()))
            .await?;
        Ok(())
    }

    /// Adds another vehicle to a customer.
    #[poise::command(slash_command, rename = "vehicle_add")]
    pub async fn customer_vehicle_add(
        ctx: Context<'_>,
        #[description = "Customer phone number"] phone: String,
        #[description = "Motorcycle model"] model: String,
        #[description = "License plate"] plate: Option<String>,
        #[description = "Motorcycle brand"] brand: Option<String>,
        #[description = "Service category"] category: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let owner = require_customer(ctx, &phone).await?;
        let new_vehicle = NewVehicle::new(
            &model,
            plate.as_deref(),
            brand.as_deref(),
            category.as_deref(),
            notes.as_deref(),
        )?;

        let added = vehicle::add_vehicle(&ctx.data().database, owner.id, new_vehicle).await?;
        send_notice(
            ctx,
            Notice::success(format!(
                "Vehicle #{} ({}) added for {}.",
                added.id, added.model, owner.name
            )),
        )
        .await
    }

    /// Edits a vehicle in place.
    #[poise::command(slash_command, rename = "vehicle_edit")]
    pub async fn customer_vehicle_edit(
        ctx: Context<'_>,
        #[description = "Vehicle id"] vehicle_id: i64,
        #[description = "Motorcycle model"] model: Option<String>,
        #[description = "License plate"] plate: Option<String>,
        #[description = "Motorcycle brand"] brand: Option<String>,
        #[description = "Service category"] category: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let current = vehicle::get_vehicle_by_id(db, vehicle_id)
            .await?
            .ok_or_else(|| Error::VehicleNotFound {
                id: vehicle_id.to_string(),
            })?;

        // Omitted options keep their current value.
        let changes = NewVehicle::new(
            model.as_deref().unwrap_or(&current.model),
            plate.as_deref().or(current.plate.as_deref()),
            brand.as_deref().or(current.brand.as_deref()),
            Some(category.as_deref().unwrap_or(&current.category)),
            notes.as_deref().or(current.notes.as_deref()),
        )?;

        let updated = vehicle::update_vehicle(db, vehicle_id, changes).await?;
        send_notice(
            ctx,
            Notice::success(format!("Vehicle #{} updated: {}.", updated.id, updated.model)),
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
