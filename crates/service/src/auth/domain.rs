use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[serde(default)]
    pub business_name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Public view of a tenant account (never carries the hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthAccount {
    pub id: Uuid,
    pub email: String,
    pub business_name: Option<String>,
}

impl AuthAccount {
    /// Display name shown in the session; falls back to the email.
    pub fn display_name(&self) -> &str {
        self.business_name.as_deref().unwrap_or(&self.email)
    }
}

/// Stored account as the repository sees it (hash included)
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub id: Uuid,
    pub email: String,
    pub business_name: Option<String>,
    pub password_hash: String,
}

impl AccountRecord {
    pub fn public(&self) -> AuthAccount {
        AuthAccount {
            id: self.id,
            email: self.email.clone(),
            business_name: self.business_name.clone(),
        }
    }
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSession {
    pub account: AuthAccount,
    pub token: Option<String>,
}

/// JWT claims carried by the session credential. The account id travels in
/// the token so handlers do not re-derive it from the email per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: String,
    pub name: String,
    pub exp: usize,
}
