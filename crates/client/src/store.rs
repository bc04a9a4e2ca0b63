//! Explicit state containers for the service and appointment lists.
//!
//! Each store keeps `{data, is_loading, error}` and exposes async actions
//! that call the API, set the loading flag for the duration of the call, and
//! capture the server's error message on failure. Recovery is manual: the
//! owner re-invokes `fetch`. No automatic retry or backoff.

use tracing::debug;
use uuid::Uuid;

use crate::api::{
    ApiClient, Appointment, ClientError, CreateAppointmentPayload, Service, ServicePayload,
    UpdateAppointmentPayload,
};

#[derive(Debug, Default)]
pub struct ServiceStore {
    pub data: Vec<Service>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ServiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn fail(&mut self, e: &ClientError) {
        self.is_loading = false;
        self.error = Some(e.to_string());
    }

    pub async fn fetch(&mut self, api: &ApiClient) {
        self.begin();
        match api.list_services().await {
            Ok(services) => {
                debug!(count = services.len(), "services fetched");
                self.data = services;
                self.is_loading = false;
            }
            Err(e) => self.fail(&e),
        }
    }

    pub async fn create(
        &mut self,
        api: &ApiClient,
        payload: &ServicePayload,
    ) -> Result<Service, ClientError> {
        self.begin();
        match api.create_service(payload).await {
            Ok(created) => {
                self.apply_created(created.clone());
                Ok(created)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    pub async fn update(
        &mut self,
        api: &ApiClient,
        id: Uuid,
        payload: &ServicePayload,
    ) -> Result<Service, ClientError> {
        self.begin();
        match api.update_service(id, payload).await {
            Ok(updated) => {
                self.apply_updated(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, id: Uuid) -> Result<(), ClientError> {
        self.begin();
        match api.delete_service(id).await {
            Ok(()) => {
                self.apply_deleted(id);
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    // Newly created entries go to the front to keep newest-first ordering.
    pub(crate) fn apply_created(&mut self, created: Service) {
        self.data.insert(0, created);
        self.is_loading = false;
    }

    pub(crate) fn apply_updated(&mut self, updated: Service) {
        if let Some(slot) = self.data.iter_mut().find(|s| s.id == updated.id) {
            *slot = updated;
        }
        self.is_loading = false;
    }

    pub(crate) fn apply_deleted(&mut self, id: Uuid) {
        self.data.retain(|s| s.id != id);
        self.is_loading = false;
    }
}

#[derive(Debug, Default)]
pub struct AppointmentStore {
    pub data: Vec<Appointment>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn fail(&mut self, e: &ClientError) {
        self.is_loading = false;
        self.error = Some(e.to_string());
    }

    pub async fn fetch(&mut self, api: &ApiClient) {
        self.begin();
        match api.list_appointments().await {
            Ok(appointments) => {
                debug!(count = appointments.len(), "appointments fetched");
                self.data = appointments;
                self.is_loading = false;
            }
            Err(e) => self.fail(&e),
        }
    }

    pub async fn create(
        &mut self,
        api: &ApiClient,
        payload: &CreateAppointmentPayload,
    ) -> Result<Appointment, ClientError> {
        self.begin();
        match api.create_appointment(payload).await {
            Ok(created) => {
                self.apply_created(created.clone());
                Ok(created)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    pub async fn update(
        &mut self,
        api: &ApiClient,
        id: Uuid,
        payload: &UpdateAppointmentPayload,
    ) -> Result<Appointment, ClientError> {
        self.begin();
        match api.update_appointment(id, payload).await {
            Ok(updated) => {
                self.apply_updated(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, id: Uuid) -> Result<(), ClientError> {
        self.begin();
        match api.delete_appointment(id).await {
            Ok(()) => {
                self.apply_deleted(id);
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    pub(crate) fn apply_created(&mut self, created: Appointment) {
        self.data.insert(0, created);
        self.is_loading = false;
    }

    pub(crate) fn apply_updated(&mut self, updated: Appointment) {
        if let Some(slot) = self.data.iter_mut().find(|a| a.id == updated.id) {
            *slot = updated;
        }
        self.is_loading = false;
    }

    pub(crate) fn apply_deleted(&mut self, id: Uuid) {
        self.data.retain(|a| a.id != id);
        self.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn service(name: &str) -> Service {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Service {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            price: 10.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn created_services_are_prepended() {
        let mut store = ServiceStore::new();
        store.apply_created(service("first"));
        store.apply_created(service("second"));
        assert_eq!(store.data[0].name, "second");
        assert_eq!(store.data[1].name, "first");
        assert!(!store.is_loading);
    }

    #[test]
    fn update_replaces_matching_entry_only() {
        let mut store = ServiceStore::new();
        let a = service("a");
        let b = service("b");
        store.data = vec![a.clone(), b.clone()];

        let mut changed = a.clone();
        changed.name = "a2".into();
        store.apply_updated(changed);
        assert_eq!(store.data[0].name, "a2");
        assert_eq!(store.data[1].name, "b");
    }

    #[test]
    fn delete_removes_by_id() {
        let mut store = ServiceStore::new();
        let a = service("a");
        let b = service("b");
        store.data = vec![a.clone(), b.clone()];
        store.apply_deleted(a.id);
        assert_eq!(store.data.len(), 1);
        assert_eq!(store.data[0].id, b.id);
    }

    #[test]
    fn failure_captures_message_and_clears_loading() {
        let mut store = ServiceStore::new();
        store.begin();
        assert!(store.is_loading);
        assert!(store.error.is_none());

        store.fail(&ClientError::Api { status: 404, message: "Service not found".into() });
        assert!(!store.is_loading);
        assert_eq!(store.error.as_deref(), Some("Service not found"));

        // A new action clears the stale error
        store.begin();
        assert!(store.error.is_none());
    }
}
