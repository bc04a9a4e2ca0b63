use crate::db::connect;
use crate::{account, appointment, errors, service};
use anyhow::Result;
use chrono::{TimeZone, Utc};
use migration::MigratorTrait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_account_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = format!("crud_{}@example.com", Uuid::new_v4());
    let created = account::create(&db, &email, "hash-value", Some("Crud Barbers")).await?;
    assert_eq!(created.email, email);
    assert_eq!(created.business_name.as_deref(), Some("Crud Barbers"));

    // Lookup is case-insensitive via normalization
    let found = account::find_by_email(&db, &email.to_uppercase()).await?;
    assert_eq!(found.map(|a| a.id), Some(created.id));

    // Duplicate email is a conflict, not a second row
    let dup = account::create(&db, &email, "other-hash", None).await;
    assert!(matches!(dup, Err(errors::ModelError::Conflict(_))));
    let count = account::Entity::find()
        .filter(account::Column::Email.eq(email.clone()))
        .all(&db)
        .await?
        .len();
    assert_eq!(count, 1);

    account::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_service_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = format!("svc_{}@example.com", Uuid::new_v4());
    let owner = account::create(&db, &email, "hash-value", None).await?;

    let created = service::create(&db, owner.id, "Haircut", 25.0, Some("Classic cut")).await?;
    assert_eq!(created.owner_id, owner.id);
    assert_eq!(created.price, 25.0);

    let found = service::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());

    let bad = service::create(&db, owner.id, "", 10.0, None).await;
    assert!(matches!(bad, Err(errors::ModelError::Validation(_))));
    let bad = service::create(&db, owner.id, "Trim", -1.0, None).await;
    assert!(matches!(bad, Err(errors::ModelError::Validation(_))));

    // Cascades the service row
    account::Entity::delete_by_id(owner.id).exec(&db).await?;
    let gone = service::Entity::find_by_id(created.id).one(&db).await?;
    assert!(gone.is_none());
    Ok(())
}

#[tokio::test]
async fn test_appointment_crud_and_default_duration() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = format!("appt_{}@example.com", Uuid::new_v4());
    let owner = account::create(&db, &email, "hash-value", None).await?;
    let svc = service::create(&db, owner.id, "Haircut", 25.0, None).await?;

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let created =
        appointment::create(&db, owner.id, svc.id, "Jane", start.into(), None).await?;
    assert_eq!(created.duration_minutes, appointment::DEFAULT_DURATION_MINUTES);
    assert_eq!(created.start_time, start);

    // Round-trip through the store
    let fetched = appointment::Entity::find_by_id(created.id).one(&db).await?.unwrap();
    assert_eq!(fetched.start_time, start);
    assert_eq!(fetched.duration_minutes, 30);

    // Join to the referenced service
    let with_service = appointment::Entity::find_by_id(created.id)
        .find_also_related(service::Entity)
        .one(&db)
        .await?;
    let (_, joined) = with_service.unwrap();
    assert_eq!(joined.map(|s| s.id), Some(svc.id));

    // Deleting the service cascades the appointment
    service::Entity::delete_by_id(svc.id).exec(&db).await?;
    let gone = appointment::Entity::find_by_id(created.id).one(&db).await?;
    assert!(gone.is_none());

    account::Entity::delete_by_id(owner.id).exec(&db).await?;
    Ok(())
}
