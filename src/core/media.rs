//! Media attachments - Before/after photos and videos recorded per appointment.
//!
//! Only the reference (path or URL) is stored; the files themselves live
//! wherever the operator interface put them.

use crate::{
    entities::{Appointment, Media, media},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Records a new attachment for an appointment.
///
/// # Errors
/// Returns `InvalidInput` for a blank path or kind, `AppointmentNotFound` if
/// the appointment does not exist, or a database error.
#[instrument(skip(db))]
pub async fn attach_media(
    db: &DatabaseConnection,
    appointment_id: i64,
    path: &str,
    kind: &str,
) -> Result<media::Model> {
    let path = path.trim();
    let kind = kind.trim().to_lowercase();
    if path.is_empty() || kind.is_empty() {
        return Err(Error::InvalidInput {
            message: "Attachment path and type are required".to_string(),
        });
    }

    Appointment::find_by_id(appointment_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::AppointmentNotFound {
            id: appointment_id.to_string(),
        })?;

    let attachment = media::ActiveModel {
        appointment_id: Set(appointment_id),
        path: Set(path.to_string()),
        kind: Set(kind),
        uploaded_at: Set(chrono::Local::now().naive_local()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(media_id = attachment.id, "Attachment recorded");
    Ok(attachment)
}

/// Attachments of one appointment, oldest first.
pub async fn list_media_for_appointment(
    db: &DatabaseConnection,
    appointment_id: i64,
) -> Result<Vec<media::Model>> {
    Media::find()
        .filter(media::Column::AppointmentId.eq(appointment_id))
        .order_by_asc(media::Column::UploadedAt)
        .order_by_asc(media::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes every attachment of an appointment. Used when the appointment is
/// deleted, inside the same transaction.
pub(crate) async fn delete_media_for_appointment<C>(db: &C, appointment_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Media::delete_many()
        .filter(media::Column::AppointmentId.eq(appointment_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
