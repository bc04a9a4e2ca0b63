use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use uuid::Uuid;

use crate::auth::{CurrentAccount, ServerState};
use crate::errors::ApiError;
use crate::extract::Json;
use service::booking::{
    self, AppointmentWithService, CreateAppointmentInput, UpdateAppointmentInput,
};

#[utoipa::path(get, path = "/api/appointment", tag = "appointments",
    responses((status = 200, description = "Caller's appointments with services, newest first")))]
pub async fn list_appointments(
    State(state): State<ServerState>,
    Extension(account): Extension<CurrentAccount>,
) -> Result<Json<Vec<AppointmentWithService>>, ApiError> {
    let appointments = booking::list_appointments(&state.db, account.id).await?;
    Ok(Json(appointments))
}

#[utoipa::path(post, path = "/api/appointment", tag = "appointments",
    request_body = crate::openapi::CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment created"),
        (status = 400, description = "Invalid client name or duration"),
        (status = 404, description = "Service not owned by caller")))]
pub async fn create_appointment(
    State(state): State<ServerState>,
    Extension(account): Extension<CurrentAccount>,
    Json(input): Json<CreateAppointmentInput>,
) -> Result<(StatusCode, Json<AppointmentWithService>), ApiError> {
    let created = booking::create_appointment(&state.db, account.id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/appointment/{id}", tag = "appointments",
    responses(
        (status = 200, description = "Appointment detail with service"),
        (status = 404, description = "Not owned by caller or missing")))]
pub async fn get_appointment(
    State(state): State<ServerState>,
    Extension(account): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentWithService>, ApiError> {
    let found = booking::get_appointment(&state.db, account.id, id).await?;
    Ok(Json(found))
}

#[utoipa::path(put, path = "/api/appointment/{id}", tag = "appointments",
    request_body = crate::openapi::UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Appointment updated"),
        (status = 400, description = "Invalid client name or duration"),
        (status = 404, description = "Appointment or new service not owned by caller")))]
pub async fn update_appointment(
    State(state): State<ServerState>,
    Extension(account): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateAppointmentInput>,
) -> Result<Json<AppointmentWithService>, ApiError> {
    let updated = booking::update_appointment(&state.db, account.id, id, input).await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/appointment/{id}", tag = "appointments",
    responses(
        (status = 200, description = "Appointment deleted"),
        (status = 404, description = "Not owned by caller or missing")))]
pub async fn delete_appointment(
    State(state): State<ServerState>,
    Extension(account): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    booking::delete_appointment(&state.db, account.id, id).await?;
    Ok(Json(serde_json::json!({ "message": "Appointment deleted successfully" })))
}
