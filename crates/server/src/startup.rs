use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use chrono::Duration;
use common::utils::logging::{init_logging_default, init_logging_json};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;
use service::auth::repo::seaorm::SeaOrmCredentialStore;
use service::auth::token::TokenIssuer;
use service::auth::AuthService;

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn use_json_logs(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v.eq_ignore_ascii_case("json"))
}

/// Initialize logging via shared common utils; `LOG_FORMAT=json` switches
/// to structured output for container setups.
fn init_logging() {
    if use_json_logs(std::env::var("LOG_FORMAT").ok().as_deref()) {
        init_logging_json();
    } else {
        init_logging_default();
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: wire config, store, issuer and service, then run the HTTP
/// server. Startup failures propagate; nothing panics here.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = models::db::connect(&cfg.database.url).await?;
    migration::Migrator::up(&db, None).await?;

    let ttl = Duration::seconds(cfg.auth.token_ttl_secs as i64);
    let issuer = TokenIssuer::new(&cfg.auth.jwt_secret, ttl)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let store = Arc::new(SeaOrmCredentialStore { db });
    let auth = Arc::new(AuthService::new(store, issuer));
    let state = ServerState { auth };

    let app: Router = routes::build_router(build_cors(), state);

    let addr = load_bind_addr(&cfg)?;
    info!(%addr, "starting sso server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
