use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{account, errors, service};

pub const DEFAULT_DURATION_MINUTES: i32 = 30;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointment")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub service_id: Uuid,
    pub client_name: String,
    pub start_time: DateTimeWithTimeZone,
    pub duration_minutes: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Account,
    Service,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Account => Entity::belongs_to(account::Entity)
                .from(Column::OwnerId)
                .to(account::Column::Id)
                .into(),
            Relation::Service => Entity::belongs_to(service::Entity)
                .from(Column::ServiceId)
                .to(service::Column::Id)
                .into(),
        }
    }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_client_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("client name required".into()));
    }
    Ok(())
}

pub fn validate_duration(minutes: i32) -> Result<(), errors::ModelError> {
    if minutes <= 0 {
        return Err(errors::ModelError::Validation("duration must be positive minutes".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    owner_id: Uuid,
    service_id: Uuid,
    client_name: &str,
    start_time: DateTimeWithTimeZone,
    duration_minutes: Option<i32>,
) -> Result<Model, errors::ModelError> {
    validate_client_name(client_name)?;
    let duration = duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
    validate_duration(duration)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_id: Set(owner_id),
        service_id: Set(service_id),
        client_name: Set(client_name.to_string()),
        start_time: Set(start_time),
        duration_minutes: Set(duration),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
