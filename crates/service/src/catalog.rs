//! Service catalog CRUD scoped to the owning account.
//!
//! Every lookup filters by `owner_id`; a row owned by another account is
//! indistinguishable from a missing row, so cross-tenant probes get 404.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use models::service::{self, validate_name, validate_price};

pub const SERVICE_NOT_FOUND: &str = "Service not found or does not belong to user";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceInput {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Full-replace payload for updates; omitted description clears the field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceInput {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// List an account's services, newest first.
pub async fn list_services(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<Vec<service::Model>, ServiceError> {
    service::Entity::find()
        .filter(service::Column::OwnerId.eq(owner_id))
        .order_by_desc(service::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::from)
}

#[instrument(skip(db, input), fields(owner_id = %owner_id, name = %input.name))]
pub async fn create_service(
    db: &DatabaseConnection,
    owner_id: Uuid,
    input: CreateServiceInput,
) -> Result<service::Model, ServiceError> {
    let created = service::create(
        db,
        owner_id,
        input.name.trim(),
        input.price,
        input.description.as_deref(),
    )
    .await?;
    info!(service_id = %created.id, "service_created");
    Ok(created)
}

/// Fetch one service; owned-by-someone-else reads as not found.
pub async fn get_service(
    db: &DatabaseConnection,
    owner_id: Uuid,
    service_id: Uuid,
) -> Result<service::Model, ServiceError> {
    find_owned(db, owner_id, service_id).await
}

/// Replace all mutable fields of a service.
#[instrument(skip(db, input), fields(owner_id = %owner_id, service_id = %service_id))]
pub async fn update_service(
    db: &DatabaseConnection,
    owner_id: Uuid,
    service_id: Uuid,
    input: UpdateServiceInput,
) -> Result<service::Model, ServiceError> {
    validate_name(&input.name).map_err(ServiceError::from)?;
    validate_price(input.price).map_err(ServiceError::from)?;

    let existing = find_owned(db, owner_id, service_id).await?;
    let mut am: service::ActiveModel = existing.into();
    am.name = Set(input.name.trim().to_string());
    am.description = Set(input.description);
    am.price = Set(input.price);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(ServiceError::from)?;
    info!("service_updated");
    Ok(updated)
}

/// Delete a service and, via FK cascade, its appointments.
#[instrument(skip(db), fields(owner_id = %owner_id, service_id = %service_id))]
pub async fn delete_service(
    db: &DatabaseConnection,
    owner_id: Uuid,
    service_id: Uuid,
) -> Result<(), ServiceError> {
    let existing = find_owned(db, owner_id, service_id).await?;
    existing.delete(db).await.map_err(ServiceError::from)?;
    info!("service_deleted");
    Ok(())
}

async fn find_owned(
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn sample(name: &str, price: f64) -> CreateServiceInput {
        CreateServiceInput { name: name.into(), description: None, price }
    }

    #[tokio::test]
    async fn test_catalog_crud_owner_scoped() {
        if test_support::skip_db_tests() {
            return;
        }
        let db = test_support::test_db().await;
        let owner = test_support::create_test_account(&db).await;
        let stranger = test_support::create_test_account(&db).await;

        let first = create_service(&db, owner, sample("Haircut", 35.0)).await.unwrap();
        let second = create_service(
            &db,
            owner,
            CreateServiceInput {
                name: "Beard Trim".into(),
                description: Some("15 minute tidy-up".into()),
                price: 12.5,
            },
        )
        .await
        .unwrap();

        // Newest first
        let listed = list_services(&db, owner).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);

        // Other owners see nothing
        assert!(list_services(&db, stranger).await.unwrap().is_empty());
        let err = get_service(&db, stranger, first.id).await.unwrap_err();
        assert_eq!(err.to_string(), SERVICE_NOT_FOUND);

        // Full replace clears an omitted description
        let updated = update_service(
            &db,
            owner,
            second.id,
            UpdateServiceInput { name: "Beard Sculpt".into(), description: None, price: 18.0 },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Beard Sculpt");
        assert_eq!(updated.description, None);
        assert_eq!(updated.price, 18.0);
        assert!(updated.updated_at >= updated.created_at);

        // Cross-tenant update and delete are 404, not 403
        let err = update_service(
            &db,
            stranger,
            second.id,
            UpdateServiceInput { name: "Hijack".into(), description: None, price: 1.0 },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(matches!(
            delete_service(&db, stranger, second.id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));

        delete_service(&db, owner, first.id).await.unwrap();
        // Deleting again is a plain not-found
        let err = delete_service(&db, owner, first.id).await.unwrap_err();
        assert_eq!(err.to_string(), SERVICE_NOT_FOUND);

        assert_eq!(list_services(&db, owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_precedes_lookup() {
        if test_support::skip_db_tests() {
            return;
        }
        let db = test_support::test_db().await;
        let owner = test_support::create_test_account(&db).await;

        let err = create_service(&db, owner, sample("  ", 10.0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let err = create_service(&db, owner, sample("Haircut", -1.0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        // Bad payload on a random id is 400, not 404
        let err = update_service(
            &db,
            owner,
            Uuid::new_v4(),
            UpdateServiceInput { name: "".into(), description: None, price: 5.0 },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
