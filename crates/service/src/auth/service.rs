use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AccountSession, Claims, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;
use models::account::{normalize_email, validate_business_name, validate_email, validate_password};

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    /// Fixed absolute session lifetime; there is no refresh or rotation.
    pub session_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: None, session_hours: 24 }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Register a new tenant account with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::default());
    /// let input = RegisterInput { business_name: Some("Acme Cuts".into()), email: "Owner@Example.com".into(), password: "secret1".into() };
    /// let account = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(account.email, "owner@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(
        &self,
        input: RegisterInput,
    ) -> Result<super::domain::AuthAccount, AuthError> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("Email and password are required".into()));
        }
        validate_email(input.email.trim()).map_err(|e| AuthError::Validation(e.to_string()))?;
        validate_password(&input.password).map_err(|e| AuthError::Validation(e.to_string()))?;
        if let Some(name) = input.business_name.as_deref() {
            validate_business_name(name).map_err(|e| AuthError::Validation(e.to_string()))?;
        }

        let email = normalize_email(&input.email);
        if let Some(existing) = self.repo.find_by_email(&email).await? {
            debug!("account exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        // The unique email index settles any create/create race: the loser
        // comes back as Conflict from the repository.
        let account = self
            .repo
            .create_account(&email, &hash, input.business_name.as_deref())
            .await?;
        info!(account_id = %account.id, email = %account.email, "account_registered");
        Ok(account)
    }

    /// Authenticate an account and optionally issue a token.
    ///
    /// An unknown email and a wrong password both come back as
    /// `Unauthorized`; callers cannot tell them apart.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig { jwt_secret: Some("secret".into()), session_hours: 24 });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { business_name: None, email: "u@e.com".into(), password: "secret1".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "secret1".into() })).unwrap();
    /// assert_eq!(session.account.email, "u@e.com");
    /// assert!(session.token.is_some());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AccountSession, AuthError> {
        let record = self
            .repo
            .find_by_email(&normalize_email(&input.email))
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&record.password_hash)
            .map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default()
            .verify_password(input.password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(AuthError::Unauthorized);
        }

        let account = record.public();
        let mut token = None;
        if let Some(secret) = &self.cfg.jwt_secret {
            let exp = (chrono::Utc::now() + chrono::Duration::hours(self.cfg.session_hours))
                .timestamp() as usize;
            let claims = Claims {
                sub: account.email.clone(),
                uid: account.id.to_string(),
                name: account.display_name().to_string(),
                exp,
            };
            token = Some(
                encode(
                    &JwtHeader::default(),
                    &claims,
                    &EncodingKey::from_secret(secret.as_bytes()),
                )
                .map_err(|e| AuthError::TokenError(e.to_string()))?,
            );
        }

        info!(account_id = %account.id, "login_ok");
        Ok(AccountSession { account, token })
    }
}

/// Decode and validate a session token (signature + expiry).
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AuthError::TokenError(e.to_string()))?;
    Ok(data.claims)
}
