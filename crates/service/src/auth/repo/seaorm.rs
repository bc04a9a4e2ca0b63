use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::auth::domain::{AccountRecord, AuthAccount};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

/// Connection-level failures map to `Unavailable` (503 at the edge); anything
/// else is a plain repository error.
fn map_db_err(e: DbErr) -> AuthError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => AuthError::Unavailable(e.to_string()),
        other => AuthError::Repository(other.to_string()),
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, AuthError> {
        let res = models::account::Entity::find()
            .filter(models::account::Column::Email.eq(email.to_string()))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(res.map(|a| AccountRecord {
            id: a.id,
            email: a.email,
            business_name: a.business_name,
            password_hash: a.password_hash,
        }))
    }

    async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
        business_name: Option<&str>,
    ) -> Result<AuthAccount, AuthError> {
        let created = models::account::create(&self.db, email, password_hash, business_name)
            .await
            .map_err(|e| match e {
                models::errors::ModelError::Conflict(_) => AuthError::Conflict,
                models::errors::ModelError::Validation(m) => AuthError::Validation(m),
                models::errors::ModelError::Db(m) => AuthError::Repository(m),
            })?;
        Ok(AuthAccount {
            id: created.id,
            email: created.email,
            business_name: created.business_name,
        })
    }
}
