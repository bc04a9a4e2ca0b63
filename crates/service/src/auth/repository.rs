use async_trait::async_trait;

use super::domain::{AccountRecord, AuthAccount};
use super::errors::AuthError;

/// Repository abstraction for account persistence.
///
/// `email` arguments are expected in normalized (lower-cased, trimmed) form.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, AuthError>;

    /// Insert a new account. Implementations must report a duplicate email as
    /// `AuthError::Conflict`, including races lost against a concurrent insert.
    async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
        business_name: Option<&str>,
    ) -> Result<AuthAccount, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAuthRepository {
        accounts: Mutex<HashMap<String, AccountRecord>>, // key: normalized email
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, AuthError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.get(email).cloned())
        }

        async fn create_account(
            &self,
            email: &str,
            password_hash: &str,
            business_name: Option<&str>,
        ) -> Result<AuthAccount, AuthError> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(AuthError::Conflict);
            }
            let record = AccountRecord {
                id: Uuid::new_v4(),
                email: email.to_string(),
                business_name: business_name.map(str::to_string),
                password_hash: password_hash.to_string(),
            };
            let public = record.public();
            accounts.insert(email.to_string(), record);
            Ok(public)
        }
    }
}
