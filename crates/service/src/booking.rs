//! Appointment booking CRUD, owner-scoped like the catalog.
//!
//! Double booking is allowed: an overlapping appointment is logged as a
//! warning but never rejected, since walk-in businesses routinely overbook.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::catalog::SERVICE_NOT_FOUND;
use crate::errors::ServiceError;
use models::appointment::{self, validate_client_name, validate_duration};
use models::service;

pub const APPOINTMENT_NOT_FOUND: &str = "Appointment not found or does not belong to user";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentInput {
    pub service_id: Uuid,
    pub client_name: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
}

/// Partial update; only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentInput {
    pub service_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
}

/// Appointment joined with its service for list/detail responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentWithService {
    #[serde(flatten)]
    pub appointment: appointment::Model,
    pub service: Option<service::Model>,
}

/// Half-open interval overlap: `[start, start+duration)` on both sides.
/// Back-to-back bookings (one ends exactly when the next starts) do not
/// overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_minutes: i32,
    b_start: DateTime<Utc>,
    b_minutes: i32,
) -> bool {
    let a_end = a_start + chrono::Duration::minutes(a_minutes as i64);
    let b_end = b_start + chrono::Duration::minutes(b_minutes as i64);
    a_start < b_end && b_start < a_end
}

/// List an account's appointments with their services, newest created first.
pub async fn list_appointments(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<Vec<AppointmentWithService>, ServiceError> {
    let rows = appointment::Entity::find()
        .filter(appointment::Column::OwnerId.eq(owner_id))
        .order_by_desc(appointment::Column::CreatedAt)
        .find_also_related(service::Entity)
        .all(db)
        .await
        .map_err(ServiceError::from)?;
    Ok(rows
        .into_iter()
        .map(|(appointment, service)| AppointmentWithService { appointment, service })
        .collect())
}

#[instrument(skip(db, input), fields(owner_id = %owner_id, service_id = %input.service_id))]
pub async fn create_appointment(
    db: &DatabaseConnection,
    owner_id: Uuid,
    input: CreateAppointmentInput,
) -> Result<AppointmentWithService, ServiceError> {
    validate_client_name(&input.client_name).map_err(ServiceError::from)?;
    if let Some(minutes) = input.duration_minutes {
        validate_duration(minutes).map_err(ServiceError::from)?;
    }
    let svc = owned_service(db, owner_id, input.service_id).await?;

    let duration = input
        .duration_minutes
        .unwrap_or(appointment::DEFAULT_DURATION_MINUTES);
    warn_on_overlap(db, owner_id, None, input.start_time, duration).await?;

    let created = appointment::create(
        db,
        owner_id,
        svc.id,
        input.client_name.trim(),
        input.start_time.into(),
        input.duration_minutes,
    )
    .await?;
    info!(appointment_id = %created.id, "appointment_created");
    Ok(AppointmentWithService { appointment: created, service: Some(svc) })
}

pub async fn get_appointment(
    db: &DatabaseConnection,
    owner_id: Uuid,
    appointment_id: Uuid,
) -> Result<AppointmentWithService, ServiceError> {
    let (appointment, service) = appointment::Entity::find_by_id(appointment_id)
        .filter(appointment::Column::OwnerId.eq(owner_id))
        .find_also_related(service::Entity)
        .one(db)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::NotFound(APPOINTMENT_NOT_FOUND.to_string()))?;
    Ok(AppointmentWithService { appointment, service })
}

/// Apply the provided fields to an appointment. A new `service_id` must
/// belong to the same account or the whole update reads as service-not-found.
#[instrument(skip(db, input), fields(owner_id = %owner_id, appointment_id = %appointment_id))]
pub async fn update_appointment(
    db: &DatabaseConnection,
    owner_id: Uuid,
    appointment_id: Uuid,
    input: UpdateAppointmentInput,
) -> Result<AppointmentWithService, ServiceError> {
    if let Some(name) = input.client_name.as_deref() {
        validate_client_name(name).map_err(ServiceError::from)?;
    }
    if let Some(minutes) = input.duration_minutes {
        validate_duration(minutes).map_err(ServiceError::from)?;
    }

    let existing = find_owned(db, owner_id, appointment_id).await?;
    if let Some(service_id) = input.service_id {
        owned_service(db, owner_id, service_id).await?;
    }

    let start = input
        .start_time
        .unwrap_or_else(|| existing.start_time.with_timezone(&Utc));
    let duration = input.duration_minutes.unwrap_or(existing.duration_minutes);
    warn_on_overlap(db, owner_id, Some(existing.id), start, duration).await?;

    let mut am: appointment::ActiveModel = existing.into();
    if let Some(service_id) = input.service_id {
        am.service_id = Set(service_id);
    }
    if let Some(name) = input.client_name {
        am.client_name = Set(name.trim().to_string());
    }
    if let Some(start_time) = input.start_time {
        am.start_time = Set(start_time.into());
    }
    if let Some(minutes) = input.duration_minutes {
        am.duration_minutes = Set(minutes);
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(ServiceError::from)?;
    info!("appointment_updated");
    get_appointment(db, owner_id, updated.id).await
}

#[instrument(skip(db), fields(owner_id = %owner_id, appointment_id = %appointment_id))]
pub async fn delete_appointment(
    db: &DatabaseConnection,
    owner_id: Uuid,
    appointment_id: Uuid,
) -> Result<(), ServiceError> {
    let existing = find_owned(db, owner_id, appointment_id).await?;
    existing.delete(db).await.map_err(ServiceError::from)?;
    info!("appointment_deleted");
    Ok(())
}

async fn find_owned(
    db: &DatabaseConnection,
    owner_id: Uuid,
    appointment_id: Uuid,
) -> Result<appointment::Model, ServiceError> {
    appointment::Entity::find_by_id(appointment_id)
        .filter(appointment::Column::OwnerId.eq(owner_id))
        .one(db)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::NotFound(APPOINTMENT_NOT_FOUND.to_string()))
}

/// A service referenced from an appointment must belong to the caller.
async fn owned_service(
    db: &DatabaseConnection,
    owner_id: Uuid,
    service_id: Uuid,
) -> Result<service::Model, ServiceError> {
    service::Entity::find_by_id(service_id)
        .filter(service::Column::OwnerId.eq(owner_id))
        .one(db)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::NotFound(SERVICE_NOT_FOUND.to_string()))
}

/// An existing booking can only overlap `[start, start+duration)` if its own
/// start lies before the new end and no more than a day before the new start,
/// so the query stays on the `(owner_id, start_time)` index instead of
/// scanning the whole history. Bookings longer than a day fall outside the
/// warning window.
async fn warn_on_overlap(
    db: &DatabaseConnection,
    owner_id: Uuid,
    exclude: Option<Uuid>,
    start: DateTime<Utc>,
    duration_minutes: i32,
) -> Result<(), ServiceError> {
    let end = start + chrono::Duration::minutes(duration_minutes as i64);
    let scan_from = start - chrono::Duration::days(1);
    let others = appointment::Entity::find()
        .filter(appointment::Column::OwnerId.eq(owner_id))
        .filter(appointment::Column::StartTime.lt(end))
        .filter(appointment::Column::StartTime.gt(scan_from))
        .all(db)
        .await
        .map_err(ServiceError::from)?;
    for other in others {
        if exclude == Some(other.id) {
            continue;
        }
        if overlaps(
            start,
            duration_minutes,
            other.start_time.with_timezone(&Utc),
            other.duration_minutes,
        ) {
            warn!(
                conflicting_id = %other.id,
                start = %start,
                "appointment overlaps an existing booking"
            );
        }
    }
    Ok(())
}
