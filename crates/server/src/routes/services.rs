use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use uuid::Uuid;

use crate::auth::{CurrentAccount, ServerState};
use crate::errors::ApiError;
use crate::extract::Json;
use service::catalog::{self, CreateServiceInput, UpdateServiceInput};

#[utoipa::path(get, path = "/api/service", tag = "services",
    responses((status = 200, description = "Caller's services, newest first")))]
pub async fn list_services(
    State(state): State<ServerState>,
    Extension(account): Extension<CurrentAccount>,
) -> Result<Json<Vec<models::service::Model>>, ApiError> {
    let services = catalog::list_services(&state.db, account.id).await?;
    Ok(Json(services))
}

#[utoipa::path(post, path = "/api/service", tag = "services",
    request_body = crate::openapi::ServiceRequest,
    responses(
        (status = 201, description = "Service created"),
        (status = 400, description = "Invalid name or price")))]
pub async fn create_service(
    State(state): State<ServerState>,
    Extension(account): Extension<CurrentAccount>,
    Json(input): Json<CreateServiceInput>,
) -> Result<(StatusCode, Json<models::service::Model>), ApiError> {
    let created = catalog::create_service(&state.db, account.id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/service/{id}", tag = "services",
    responses(
        (status = 200, description = "Service detail"),
        (status = 404, description = "Not owned by caller or missing")))]
pub async fn get_service(
    State(state): State<ServerState>,
    Extension(account): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::service::Model>, ApiError> {
    let found = catalog::get_service(&state.db, account.id, id).await?;
    Ok(Json(found))
}

#[utoipa::path(put, path = "/api/service/{id}", tag = "services",
    request_body = crate::openapi::ServiceRequest,
    responses(
        (status = 200, description = "Service replaced"),
        (status = 400, description = "Invalid name or price"),
        (status = 404, description = "Not owned by caller or missing")))]
pub async fn update_service(
    State(state): State<ServerState>,
    Extension(account): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateServiceInput>,
) -> Result<Json<models::service::Model>, ApiError> {
    let updated = catalog::update_service(&state.db, account.id, id, input).await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/service/{id}", tag = "services",
    responses(
        (status = 200, description = "Service and its appointments deleted"),
        (status = 404, description = "Not owned by caller or missing")))]
pub async fn delete_service(
    State(state): State<ServerState>,
    Extension(account): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    catalog::delete_service(&state.db, account.id, id).await?;
    Ok(Json(serde_json::json!({ "message": "Service deleted successfully" })))
}
