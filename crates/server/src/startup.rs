use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::{ServerAuthConfig, ServerState};
use crate::routes;

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Bind address from config when present, env vars otherwise
fn bind_addr(cfg: Option<&configs::AppConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(cfg) => (cfg.server.host.clone(), cfg.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

fn auth_config(cfg: Option<&configs::AppConfig>) -> ServerAuthConfig {
    match cfg {
        Some(cfg) => ServerAuthConfig {
            jwt_secret: cfg.auth.jwt_secret.clone(),
            session_hours: cfg.auth.session_hours,
        },
        None => ServerAuthConfig {
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "dev-secret-change-me".to_string()),
            session_hours: 24,
        },
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // One config read per boot; every fallback below keys off its absence.
    let cfg = configs::AppConfig::load_and_validate().ok();

    // Pool settings come from config.toml when present; otherwise the
    // DATABASE_URL default applies.
    let db = match &cfg {
        Some(cfg) => models::db::connect_with_config(&cfg.database).await?,
        None => models::db::connect().await?,
    };
    // Idempotent: already-applied migrations are skipped
    migration::Migrator::up(&db, None).await?;

    let state = ServerState { db, auth: auth_config(cfg.as_ref()) };

    let app: Router = routes::build_router(build_cors(), state);

    let addr = bind_addr(cfg.as_ref())?;
    info!(%addr, "starting scheduling server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
