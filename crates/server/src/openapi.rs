use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub business_name: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct ServiceRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(ToSchema)]
pub struct CreateAppointmentRequest {
    pub service_id: Uuid,
    pub client_name: String,
    pub start_time: String,
    pub duration_minutes: Option<i32>,
}

#[derive(ToSchema)]
pub struct UpdateAppointmentRequest {
    pub service_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub start_time: Option<String>,
    pub duration_minutes: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::auth::register,
        crate::auth::login,
        crate::auth::logout,
        crate::routes::services::list_services,
        crate::routes::services::create_service,
        crate::routes::services::get_service,
        crate::routes::services::update_service,
        crate::routes::services::delete_service,
        crate::routes::appointments::list_appointments,
        crate::routes::appointments::create_appointment,
        crate::routes::appointments::get_appointment,
        crate::routes::appointments::update_appointment,
        crate::routes::appointments::delete_appointment,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            ServiceRequest,
            CreateAppointmentRequest,
            UpdateAppointmentRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "services"),
        (name = "appointments")
    )
)]
pub struct ApiDoc;
