//! Appointment state machine - Scheduling and status transitions.
//!
//! Every transition runs inside one database transaction together with its
//! side effects on the discount and inventory ledgers:
//!
//! - scheduling spends a discount credit if the customer has one (10% off);
//! - the first completion runs the inventory depletion pass and, when it is the
//!   customer's first completed wash, rewards the referrer with one credit;
//! - cancelling or deleting an appointment that still holds an unspent
//!   discount gives the credit back.
//!
//! If anything fails the transaction is dropped and nothing is written.

use crate::{
    core::{discount, inventory, media},
    entities::{Appointment, AppointmentStatus, Customer, Vehicle, appointment, customer},
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{
    DatabaseTransaction, PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use tracing::{debug, info, instrument, warn};

/// Format accepted for caller-supplied clock times.
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Validated input for scheduling an appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    /// Customer being served
    pub customer_id: i64,
    /// Vehicle to wash, owned by the customer
    pub vehicle_id: i64,
    /// Booked date and time
    pub scheduled_at: NaiveDateTime,
    /// Service label
    pub service_type: String,
    /// Catalog price before any discount
    pub base_price: f64,
}

impl NewAppointment {
    /// Validates the service label and price.
    ///
    /// # Errors
    /// Returns `InvalidInput` for a blank service label and `InvalidAmount` for a
    /// negative or non-finite price.
    pub fn new(
        customer_id: i64,
        vehicle_id: i64,
        scheduled_at: NaiveDateTime,
        service_type: &str,
        base_price: f64,
    ) -> Result<Self> {
        let service_type = service_type.trim();
        if service_type.is_empty() {
            return Err(Error::InvalidInput {
                message: "Service type cannot be empty".to_string(),
            });
        }
        if !base_price.is_finite() || base_price < 0.0 {
            return Err(Error::InvalidAmount { amount: base_price });
        }

        Ok(Self {
            customer_id,
            vehicle_id,
            scheduled_at,
            service_type: service_type.to_string(),
            base_price,
        })
    }
}

/// Parses a `YYYY-MM-DD` date and `HH:MM` time into a booking timestamp.
///
/// # Errors
/// Returns `InvalidInput` if either part is malformed.
pub fn parse_schedule(date: &str, time: &str) -> Result<NaiveDateTime> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
        Error::InvalidInput {
            message: format!("Invalid date '{date}' (expected YYYY-MM-DD): {e}"),
        }
    })?;
    let clock = NaiveTime::parse_from_str(time.trim(), CLOCK_FORMAT).map_err(|e| {
        Error::InvalidInput {
            message: format!("Invalid time '{time}' (expected HH:MM): {e}"),
        }
    })?;
    Ok(day.and_time(clock))
}

/// Combines an optional `HH:MM` clock time with the date of `now`.
///
/// Missing or malformed input falls back to `now` itself rather than failing.
#[must_use]
pub fn resolve_clock_time(clock: Option<&str>, now: NaiveDateTime) -> NaiveDateTime {
    let Some(raw) = clock.map(str::trim).filter(|c| !c.is_empty()) else {
        return now;
    };

    match NaiveTime::parse_from_str(raw, CLOCK_FORMAT) {
        Ok(time) => now.date().and_time(time),
        Err(e) => {
            warn!("Ignoring malformed clock time '{raw}': {e}");
            now
        }
    }
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Books an appointment, spending one discount credit if the customer has any.
///
/// The credit check-and-decrement and the insert share one transaction, so a
/// credit is never spent on an appointment that was not stored.
///
/// # Errors
/// Returns an error if:
/// - The customer does not exist (`CustomerNotFound`)
/// - The vehicle does not exist or belongs to someone else (`VehicleNotFound`)
/// - The database operation fails
#[instrument(skip(db), fields(customer_id = new_appointment.customer_id))]
pub async fn schedule_appointment(
    db: &DatabaseConnection,
    new_appointment: NewAppointment,
) -> Result<appointment::Model> {
    let txn = db.begin().await?;

    let customer = Customer::find_by_id(new_appointment.customer_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::CustomerNotFound {
            id: new_appointment.customer_id.to_string(),
        })?;

    let vehicle = Vehicle::find_by_id(new_appointment.vehicle_id)
        .one(&txn)
        .await?
        .filter(|v| v.customer_id == customer.id)
        .ok_or_else(|| Error::VehicleNotFound {
            id: new_appointment.vehicle_id.to_string(),
        })?;

    let discount_applied = discount::consume_if_available(&txn, customer.id).await?;
    let charged_price = if discount_applied {
        discount::apply_discount(new_appointment.base_price)
    } else {
        new_appointment.base_price
    };

    let appointment = appointment::ActiveModel {
        customer_id: Set(customer.id),
        vehicle_id: Set(vehicle.id),
        scheduled_at: Set(new_appointment.scheduled_at),
        status: Set(AppointmentStatus::Scheduled),
        service_type: Set(new_appointment.service_type),
        charged_price: Set(charged_price),
        discount_applied: Set(discount_applied),
        started_at: Set(None),
        finished_at: Set(None),
        product_cost: Set(0.0),
        extra_expenses: Set(0.0),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        appointment_id = appointment.id,
        discount_applied, charged_price, "Appointment scheduled"
    );
    Ok(appointment)
}

/// Loads an appointment inside a transaction and checks the requested move.
async fn load_for_transition(
    txn: &DatabaseTransaction,
    appointment_id: i64,
    target: AppointmentStatus,
) -> Result<appointment::Model> {
    let appointment = Appointment::find_by_id(appointment_id)
        .one(txn)
        .await?
        .ok_or_else(|| Error::AppointmentNotFound {
            id: appointment_id.to_string(),
        })?;

    if !appointment.status.can_transition_to(target) {
        return Err(Error::InvalidTransition {
            id: appointment_id,
            from: appointment.status,
            to: target,
        });
    }
    Ok(appointment)
}

/// Marks the wash as started.
///
/// `clock` is an optional `HH:MM` time for today; when absent or malformed the
/// current time is recorded.
///
/// # Errors
/// Returns `AppointmentNotFound`, `InvalidTransition` for a completed or
/// cancelled appointment, or a database error.
#[instrument(skip(db))]
pub async fn start_appointment(
    db: &DatabaseConnection,
    appointment_id: i64,
    clock: Option<&str>,
) -> Result<appointment::Model> {
    let txn = db.begin().await?;
    let appointment =
        load_for_transition(&txn, appointment_id, AppointmentStatus::InProgress).await?;

    let mut active: appointment::ActiveModel = appointment.into();
    active.status = Set(AppointmentStatus::InProgress);
    active.started_at = Set(Some(resolve_clock_time(clock, local_now())));
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    info!("Appointment started");
    Ok(updated)
}

/// Marks the wash as completed.
///
/// Records the finish time by the same rule as [`start_appointment`]. The
/// first time an appointment completes (its product cost is still zero) one
/// depletion pass runs and its total becomes the appointment's product cost;
/// later calls only refresh the finish time. On the transition into
/// `Completed`, if this is the customer's first completed wash and someone
/// referred them, the referrer earns one discount credit.
///
/// # Errors
/// Returns `AppointmentNotFound`, `InvalidTransition` for a cancelled
/// appointment, or a database error.
#[instrument(skip(db))]
pub async fn complete_appointment(
    db: &DatabaseConnection,
    appointment_id: i64,
    clock: Option<&str>,
) -> Result<appointment::Model> {
    let txn = db.begin().await?;
    let appointment =
        load_for_transition(&txn, appointment_id, AppointmentStatus::Completed).await?;

    let newly_completed = appointment.status != AppointmentStatus::Completed;
    let needs_depletion = appointment.needs_depletion();
    let customer_id = appointment.customer_id;

    let mut active: appointment::ActiveModel = appointment.into();
    active.status = Set(AppointmentStatus::Completed);
    active.finished_at = Set(Some(resolve_clock_time(clock, local_now())));

    if needs_depletion {
        let cost = inventory::deplete_for_wash(&txn).await?;
        active.product_cost = Set(cost);
    } else {
        debug!("Product cost already recorded, skipping depletion");
    }

    let updated = active.update(&txn).await?;

    if newly_completed {
        reward_referrer_on_first_completion(&txn, customer_id).await?;
    }

    txn.commit().await?;
    info!(product_cost = updated.product_cost, "Appointment completed");
    Ok(updated)
}

/// Grants the referrer one credit when `customer_id` has exactly one
/// completed appointment and their referrer has not been paid yet.
///
/// The `referral_rewarded` flag is flipped in the same transaction, so
/// deleting the first completed wash and completing another pays nothing.
async fn reward_referrer_on_first_completion(
    txn: &DatabaseTransaction,
    customer_id: i64,
) -> Result<()> {
    let customer = Customer::find_by_id(customer_id)
        .one(txn)
        .await?
        .ok_or_else(|| Error::CustomerNotFound {
            id: customer_id.to_string(),
        })?;

    let Some(referrer_id) = customer.referrer_id else {
        return Ok(());
    };
    if customer.referral_rewarded {
        debug!(referrer_id, "Referrer already rewarded for this customer");
        return Ok(());
    }
    if count_completed_for_customer(txn, customer_id).await? != 1 {
        return Ok(());
    }

    match discount::grant(txn, referrer_id, 1).await {
        Ok(()) => {}
        Err(Error::CustomerNotFound { .. }) => {
            warn!(referrer_id, "Referrer no longer exists, no reward granted");
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    Customer::update_many()
        .col_expr(customer::Column::ReferralRewarded, Expr::value(true))
        .filter(customer::Column::Id.eq(customer_id))
        .exec(txn)
        .await?;

    info!(referrer_id, "Referral reward granted");
    Ok(())
}

/// Outcome of [`cancel_appointment`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cancellation {
    /// The appointment as stored after the call
    pub appointment: appointment::Model,
    /// Whether a discount credit went back to the customer
    pub credit_refunded: bool,
}

/// Cancels an appointment, refunding its discount credit if one was spent.
///
/// Cancelling an already cancelled appointment changes nothing and reports
/// no refund.
///
/// # Errors
/// Returns `AppointmentNotFound`, `InvalidTransition` for a completed
/// appointment, or a database error.
#[instrument(skip(db))]
pub async fn cancel_appointment(
    db: &DatabaseConnection,
    appointment_id: i64,
) -> Result<Cancellation> {
    let txn = db.begin().await?;
    let appointment =
        load_for_transition(&txn, appointment_id, AppointmentStatus::Cancelled).await?;

    if appointment.status == AppointmentStatus::Cancelled {
        debug!("Appointment already cancelled");
        return Ok(Cancellation {
            appointment,
            credit_refunded: false,
        });
    }

    let credit_refunded = appointment.discount_applied;
    if credit_refunded {
        discount::refund(&txn, appointment.customer_id, 1).await?;
    }

    let mut active: appointment::ActiveModel = appointment.into();
    active.status = Set(AppointmentStatus::Cancelled);
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    info!(credit_refunded, "Appointment cancelled");
    Ok(Cancellation {
        appointment: updated,
        credit_refunded,
    })
}

/// Permanently removes an appointment and its attachments.
///
/// An unspent discount (the appointment was neither completed nor cancelled)
/// is refunded to the customer first.
///
/// # Errors
/// Returns `AppointmentNotFound` or a database error.
#[instrument(skip(db))]
pub async fn delete_appointment(db: &DatabaseConnection, appointment_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let appointment = Appointment::find_by_id(appointment_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::AppointmentNotFound {
            id: appointment_id.to_string(),
        })?;

    if appointment.discount_applied && !appointment.status.is_terminal() {
        discount::refund(&txn, appointment.customer_id, 1).await?;
    }

    let removed_media = media::delete_media_for_appointment(&txn, appointment_id).await?;
    appointment.delete(&txn).await?;

    txn.commit().await?;
    info!(removed_media, "Appointment deleted");
    Ok(())
}

/// Moves a pending appointment to a new date and time.
///
/// # Errors
/// Returns `AppointmentNotFound`, `InvalidInput` if the appointment is already
/// completed or cancelled, or a database error.
#[instrument(skip(db))]
pub async fn reschedule_appointment(
    db: &DatabaseConnection,
    appointment_id: i64,
    scheduled_at: NaiveDateTime,
) -> Result<appointment::Model> {
    let appointment = find_existing(db, appointment_id).await?;
    if appointment.status.is_terminal() {
        return Err(Error::InvalidInput {
            message: format!(
                "Appointment {appointment_id} is {} and cannot be rescheduled",
                appointment.status
            ),
        });
    }

    let mut active: appointment::ActiveModel = appointment.into();
    active.scheduled_at = Set(scheduled_at);
    active.update(db).await.map_err(Into::into)
}

/// Sets the extra (non-product) expenses of an appointment.
///
/// # Errors
/// Returns `InvalidAmount` for a negative or non-finite amount,
/// `AppointmentNotFound`, or a database error.
#[instrument(skip(db))]
pub async fn record_extra_expenses(
    db: &DatabaseConnection,
    appointment_id: i64,
    amount: f64,
) -> Result<appointment::Model> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let mut active: appointment::ActiveModel = find_existing(db, appointment_id).await?.into();
    active.extra_expenses = Set(amount);
    active.update(db).await.map_err(Into::into)
}

async fn find_existing(db: &DatabaseConnection, appointment_id: i64) -> Result<appointment::Model> {
    Appointment::find_by_id(appointment_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::AppointmentNotFound {
            id: appointment_id.to_string(),
        })
}

/// Retrieves an appointment by id.
pub async fn get_appointment_by_id(
    db: &DatabaseConnection,
    appointment_id: i64,
) -> Result<Option<appointment::Model>> {
    Appointment::find_by_id(appointment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Appointments booked at or after `from`, soonest first.
pub async fn list_upcoming(
    db: &DatabaseConnection,
    from: NaiveDateTime,
) -> Result<Vec<appointment::Model>> {
    Appointment::find()
        .filter(appointment::Column::ScheduledAt.gte(from))
        .order_by_asc(appointment::Column::ScheduledAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Appointments from midnight of `now`'s day onward, so washes booked earlier
/// today (including ones still in progress) stay listed.
pub async fn list_from_today(
    db: &DatabaseConnection,
    now: NaiveDateTime,
) -> Result<Vec<appointment::Model>> {
    list_upcoming(db, now.date().and_time(NaiveTime::MIN)).await
}

/// A customer's appointments, most recent booking first.
pub async fn list_for_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Vec<appointment::Model>> {
    Appointment::find()
        .filter(appointment::Column::CustomerId.eq(customer_id))
        .order_by_desc(appointment::Column::ScheduledAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of completed appointments a customer has.
pub async fn count_completed_for_customer<C>(db: &C, customer_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    Appointment::find()
        .filter(appointment::Column::CustomerId.eq(customer_id))
        .filter(appointment::Column::Status.eq(AppointmentStatus::Completed))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Looks up the customer row for an appointment's owner.
pub async fn get_appointment_customer(
    db: &DatabaseConnection,
    appointment: &appointment::Model,
) -> Result<customer::Model> {
    appointment
        .find_related(Customer)
        .one(db)
        .await?
        .ok_or_else(|| Error::CustomerNotFound {
            id: appointment.customer_id.to_string(),
        })
}
