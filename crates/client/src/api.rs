use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Error reported by the server's `{"message": ...}` body.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub business_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user: Account,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: Account,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub service_id: Uuid,
    pub client_name: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub service: Option<Service>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    pub service_id: Uuid,
    pub client_name: String,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
}

/// Typed HTTP client for the scheduling API. The session cookie set by
/// `login` is kept in the cookie store, so subsequent calls are
/// authenticated without passing a token around.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        business_name: Option<&str>,
    ) -> Result<RegisterResponse, ClientError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "businessName": business_name,
        });
        let resp = self.http.post(self.url("/api/register")).json(&body).send().await?;
        decode(resp).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let resp = self.http.post(self.url("/api/login")).json(&body).send().await?;
        decode(resp).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let resp = self.http.post(self.url("/api/logout")).send().await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn list_services(&self) -> Result<Vec<Service>, ClientError> {
        let resp = self.http.get(self.url("/api/service")).send().await?;
        decode(resp).await
    }

    pub async fn create_service(&self, payload: &ServicePayload) -> Result<Service, ClientError> {
        let resp = self.http.post(self.url("/api/service")).json(payload).send().await?;
        decode(resp).await
    }

    pub async fn update_service(
        &self,
        id: Uuid,
        payload: &ServicePayload,
    ) -> Result<Service, ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/api/service/{}", id)))
            .json(payload)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete_service(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = self.http.delete(self.url(&format!("/api/service/{}", id))).send().await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, ClientError> {
        let resp = self.http.get(self.url("/api/appointment")).send().await?;
        decode(resp).await
    }

    pub async fn create_appointment(
        &self,
        payload: &CreateAppointmentPayload,
    ) -> Result<Appointment, ClientError> {
        let resp = self.http.post(self.url("/api/appointment")).json(payload).send().await?;
        decode(resp).await
    }

    pub async fn update_appointment(
        &self,
        id: Uuid,
        payload: &UpdateAppointmentPayload,
    ) -> Result<Appointment, ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/api/appointment/{}", id)))
            .json(payload)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete_appointment(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/appointment/{}", id)))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    tracing::debug!(status = status.as_u16(), message = %message, "api error response");
    Err(ClientError::Api { status: status.as_u16(), message })
}

async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let resp = check(resp).await?;
    Ok(resp.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.url("/api/health"), "http://localhost:8080/api/health");
    }

    #[test]
    fn appointment_parses_wire_shape_with_nested_service() {
        let raw = serde_json::json!({
            "id": "5f0c1a34-9df0-4f2d-8a3e-111111111111",
            "ownerId": "5f0c1a34-9df0-4f2d-8a3e-222222222222",
            "serviceId": "5f0c1a34-9df0-4f2d-8a3e-333333333333",
            "clientName": "Jane",
            "startTime": "2024-01-01T09:00:00Z",
            "durationMinutes": 30,
            "createdAt": "2024-01-01T08:00:00Z",
            "updatedAt": "2024-01-01T08:00:00Z",
            "service": {
                "id": "5f0c1a34-9df0-4f2d-8a3e-333333333333",
                "ownerId": "5f0c1a34-9df0-4f2d-8a3e-222222222222",
                "name": "Haircut",
                "description": null,
                "price": 25.0,
                "createdAt": "2024-01-01T07:00:00Z",
                "updatedAt": "2024-01-01T07:00:00Z"
            }
        });
        let appt: Appointment = serde_json::from_value(raw).unwrap();
        assert_eq!(appt.client_name, "Jane");
        assert_eq!(appt.duration_minutes, 30);
        assert_eq!(appt.service.unwrap().name, "Haircut");
    }

    #[test]
    fn update_payload_skips_absent_fields() {
        let payload = UpdateAppointmentPayload {
            duration_minutes: Some(45),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "durationMinutes": 45 }));
    }
}
