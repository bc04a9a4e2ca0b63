use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::Json;
use service::auth::domain::{AuthAccount, LoginInput, RegisterInput};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{decode_token, AuthConfig, AuthService};

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub session_hours: i64,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        AuthService::new(
            Arc::new(SeaOrmAuthRepository { db: self.db.clone() }),
            AuthConfig {
                jwt_secret: Some(self.auth.jwt_secret.clone()),
                session_hours: self.auth.session_hours,
            },
        )
    }
}

/// Authenticated caller, injected into request extensions by the middleware.
#[derive(Clone, Debug)]
pub struct CurrentAccount {
    pub id: Uuid,
    pub email: String,
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub message: String,
    pub user: AuthAccount,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub user: AuthAccount,
    pub token: String,
}

#[utoipa::path(post, path = "/api/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid email, password, or business name"),
        (status = 409, description = "Email already registered")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<RegisterOutput>), ApiError> {
    let account = state.auth_service().register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterOutput { message: "Account created successfully".into(), user: account }),
    ))
}

#[utoipa::path(post, path = "/api/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in, session cookie set"),
        (status = 401, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), ApiError> {
    let session = state.auth_service().login(input).await?;
    let token = session.token.ok_or_else(ApiError::internal)?;

    let mut cookie = Cookie::new(AUTH_COOKIE, token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    Ok((jar, Json(LoginOutput { user: session.account, token })))
}

#[utoipa::path(post, path = "/api/logout", tag = "auth",
    responses((status = 204, description = "Session cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::from(AUTH_COOKIE));
    (jar, StatusCode::NO_CONTENT)
}

fn is_public(path: &str, method: &axum::http::Method) -> bool {
    path == "/api/health"
        || path == "/api/register"
        || path == "/api/login"
        || path == "/api/logout"
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
        || *method == axum::http::Method::OPTIONS
}

/// Global middleware: outside the public whitelist, every request must carry a
/// valid session token as `Authorization: Bearer <token>` or as the
/// `auth_token` cookie. The verified account lands in request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    if is_public(&path, req.method()) {
        return Ok(next.run(req).await);
    }

    let token = match bearer_token(&req) {
        Some(t) => t,
        None => match cookie_token(&req) {
            Some(t) => t,
            None => {
                tracing::warn!(path = %path, "missing session token");
                return Err(ApiError::unauthorized("Authentication required"));
            }
        },
    };

    let claims = decode_token(&state.auth.jwt_secret, &token).map_err(|e| {
        tracing::warn!(path = %path, err = %e, "token validation failed");
        ApiError::unauthorized("Invalid or expired token")
    })?;
    let id = Uuid::parse_str(&claims.uid)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    req.extensions_mut().insert(CurrentAccount { id, email: claims.sub });
    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<String> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    header.strip_prefix("Bearer ").map(str::to_string)
}

fn cookie_token(req: &Request) -> Option<String> {
    let header = req
        .headers()
        .get(axum::http::header::COOKIE)?
        .to_str()
        .ok()?;
    for part in header.split(';') {
        if let Some(rest) = part.trim().strip_prefix("auth_token=") {
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}
