use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub business_name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Canonical email form used for lookups and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    // local@domain.tld, no whitespace in any part
    let invalid = || errors::ModelError::Validation("Please enter a valid email address".into());
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty() || tld.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), errors::ModelError> {
    if password.len() < 6 {
        return Err(errors::ModelError::Validation(
            "Password must be at least 6 characters long".into(),
        ));
    }
    Ok(())
}

pub fn validate_business_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().len() < 2 {
        return Err(errors::ModelError::Validation(
            "Business name must be at least 2 characters long".into(),
        ));
    }
    Ok(())
}

fn is_unique_violation(err: &DbErr) -> bool {
    let msg = err.to_string();
    msg.contains("duplicate key value violates unique constraint") || msg.contains("UNIQUE")
}

/// Insert a new account. The unique key on `email` resolves concurrent
/// duplicate registrations; a violation surfaces as `Conflict`.
pub async fn create(
    db: &DatabaseConnection,
    email: &str,
    password_hash: &str,
    business_name: Option<&str>,
) -> Result<Model, errors::ModelError> {
    validate_email(email)?;
    if password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(normalize_email(email)),
        password_hash: Set(password_hash.to_string()),
        business_name: Set(business_name.map(|n| n.trim().to_string())),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            errors::ModelError::Conflict("User with this email already exists".into())
        } else {
            errors::ModelError::Db(e.to_string())
        }
    })
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Email.eq(normalize_email(email)))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
