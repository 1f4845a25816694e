//! Appointment commands - booking, status transitions and attachments.
//!
//! Every subcommand maps to one core operation; the ledger side effects
//! (discount credits, stock depletion, referral rewards) happen in the core.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context, handlers::autocomplete::autocomplete_service_name, require_customer,
            send_notice,
        },
        core::{
            appointment::{self, NewAppointment},
            media,
            notice::Notice,
            pricing,
            report::format_currency,
            vehicle,
        },
        entities::appointment::Model as AppointmentModel,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

    fn describe(a: &AppointmentModel) -> String {
        format!(
            "#{} {} - {} - {} ({})",
            a.id,
            a.scheduled_at.format(DISPLAY_FORMAT),
            a.service_type,
            format_currency(a.charged_price),
            a.status
        )
    }

    /// Appointment commands.
    #[poise::command(
        slash_command,
        subcommands(
            "appointment_schedule",
            "appointment_start",
            "appointment_finish",
            "appointment_cancel",
            "appointment_delete",
            "appointment_reschedule",
            "appointment_expenses",
            "appointment_attach",
            "appointment_upcoming"
        )
    )]
    #[allow(clippy::unused_async)]
    pub async fn appointment(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Books a wash. The price comes from the catalog unless given explicitly.
    #[poise::command(slash_command, rename = "schedule")]
    pub async fn appointment_schedule(
        ctx: Context<'_>,
        #[description = "Customer phone number"] phone: String,
        #[description = "Date (YYYY-MM-DD)"] date: String,
        #[description = "Time (HH:MM)"] time: String,
        #[description = "Service"]
        #[autocomplete = "autocomplete_service_name"]
        service: String,
        #[description = "Vehicle id (defaults to the customer's first vehicle)"] vehicle_id: Option<
            i64,
        >,
        #[description = "Price override"] price: Option<f64>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let owner = require_customer(ctx, &phone).await?;

        let vehicle_id = match vehicle_id {
            Some(id) => id,
            None => vehicle::list_vehicles_for_customer(db, owner.id)
                .await?
                .first()
                .map(|v| v.id)
                .ok_or_else(|| Error::InvalidInput {
                    message: format!("{} has no registered vehicle", owner.name),
                })?,
        };

        let base_price = match price {
            Some(p) => p,
            None => {
                pricing::get_service_by_name(db, &service)
                    .await?
                    .ok_or_else(|| Error::ServiceNotFound {
                        name: service.clone(),
                    })?
                    .price
            }
        };

        let scheduled_at = appointment::parse_schedule(&date, &time)?;
        let new_appointment =
            NewAppointment::new(owner.id, vehicle_id, scheduled_at, &service, base_price)?;
        let booked = appointment::schedule_appointment(db, new_appointment).await?;

        let mut message = format!("Appointment booked for {}: {}", owner.name, describe(&booked));
        if booked.discount_applied {
            message.push_str(" - referral discount applied 🎟️");
        }
        send_notice(ctx, Notice::success(message)).await
    }

    /// Marks an appointment as in progress.
    #[poise::command(slash_command, rename = "start")]
    pub async fn appointment_start(
        ctx: Context<'_>,
        #[description = "Appointment id"] id: i64,
        #[description = "Start time (HH:MM, defaults to now)"] time: Option<String>,
    ) -> Result<()> {
        let started =
            appointment::start_appointment(&ctx.data().database, id, time.as_deref()).await?;
        let at = started
            .started_at
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default();
        send_notice(
            ctx,
            Notice::success(format!("Appointment #{} started at {at}.", started.id)),
        )
        .await
    }

    /// Marks an appointment as completed.
    #[poise::command(slash_command, rename = "finish")]
    pub async fn appointment_finish(
        ctx: Context<'_>,
        #[description = "Appointment id"] id: i64,
        #[description = "Finish time (HH:MM, defaults to now)"] time: Option<String>,
    ) -> Result<()> {
        let finished =
            appointment::complete_appointment(&ctx.data().database, id, time.as_deref()).await?;
        send_notice(
            ctx,
            Notice::success(format!(
                "Appointment #{} completed. Charged {}, product cost {}.",
                finished.id,
                format_currency(finished.charged_price),
                format_currency(finished.product_cost)
            )),
        )
        .await
    }

    /// Cancels an appointment, giving back any discount credit it used.
    #[poise::command(slash_command, rename = "cancel")]
    pub async fn appointment_cancel(
        ctx: Context<'_>,
        #[description = "Appointment id"] id: i64,
    ) -> Result<()> {
        let cancellation = appointment::cancel_appointment(&ctx.data().database, id).await?;
        let mut message = format!("Appointment #{} cancelled.", cancellation.appointment.id);
        if cancellation.credit_refunded {
            message.push_str(" Discount credit returned to the customer.");
        }
        send_notice(ctx, Notice::success(message)).await
    }

    /// Deletes an appointment and its attachments.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn appointment_delete(
        ctx: Context<'_>,
        #[description = "Appointment id"] id: i64,
    ) -> Result<()> {
        appointment::delete_appointment(&ctx.data().database, id).await?;
        send_notice(ctx, Notice::success(format!("Appointment #{id} deleted."))).await
    }

    /// Moves an appointment to another date and time.
    #[poise::command(slash_command, rename = "reschedule")]
    pub async fn appointment_reschedule(
        ctx: Context<'_>,
        #[description = "Appointment id"] id: i64,
        #[description = "New date (YYYY-MM-DD)"] date: String,
        #[description = "New time (HH:MM)"] time: String,
    ) -> Result<()> {
        let scheduled_at = appointment::parse_schedule(&date, &time)?;
        let moved =
            appointment::reschedule_appointment(&ctx.data().database, id, scheduled_at).await?;
        send_notice(ctx, Notice::success(format!("Rescheduled: {}", describe(&moved)))).await
    }

    /// Records extra expenses (fuel, parking, ...) for an appointment.
    #[poise::command(slash_command, rename = "expenses")]
    pub async fn appointment_expenses(
        ctx: Context<'_>,
        #[description = "Appointment id"] id: i64,
        #[description = "Total extra expenses"] amount: f64,
    ) -> Result<()> {
        let updated =
            appointment::record_extra_expenses(&ctx.data().database, id, amount).await?;
        send_notice(
            ctx,
            Notice::success(format!(
                "Extra expenses for appointment #{} set to {}.",
                updated.id,
                format_currency(updated.extra_expenses)
            )),
        )
        .await
    }

    /// Attaches a before/after photo to an appointment.
    #[poise::command(slash_command, rename = "attach")]
    pub async fn appointment_attach(
        ctx: Context<'_>,
        #[description = "Appointment id"] id: i64,
        #[description = "Photo or video"] file: serenity::Attachment,
        #[description = "Kind (before, after, ...)"] kind: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let attached = media::attach_media(db, id, &file.url, kind.as_deref().unwrap_or("before"))
            .await?;
        let total = media::list_media_for_appointment(db, id).await?.len();
        send_notice(
            ctx,
            Notice::success(format!(
                "Attached {} as '{}' to appointment #{id} ({total} file(s)).",
                file.filename, attached.kind
            )),
        )
        .await
    }

    /// Lists today's and future appointments.
    #[poise::command(slash_command, rename = "upcoming")]
    pub async fn appointment_upcoming(ctx: Context<'_>) -> Result<()> {
        let db = &ctx.data().database;
        let now = chrono::Local::now().naive_local();
        let upcoming = appointment::list_from_today(db, now).await?;
        if upcoming.is_empty() {
            return send_notice(ctx, Notice::info("No upcoming appointments.")).await;
        }

        let mut lines = Vec::with_capacity(upcoming.len());
        for a in &upcoming {
            let who = appointment::get_appointment_customer(db, a).await?;
            lines.push(format!("• {} - {}", describe(a), who.name));
        }

        ctx.say(format!("**Upcoming appointments**\n{}", lines.join("\n")))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
