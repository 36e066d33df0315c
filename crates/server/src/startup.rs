use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::blog::{repo::seaorm::SeaOrmBlogRepository, repository::BlogRepository, BlogConfig, BlogService};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file first; without one, defaults plus `DATABASE_URL`,
/// `SERVER_HOST` and `SERVER_PORT`.
fn load_config() -> Result<configs::AppConfig, StartupError> {
    let from_file = configs::load_default().is_ok();
    let mut cfg = configs::AppConfig::load_or_default().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    if !from_file {
        warn!("config file not found; using defaults and environment");
        common::env::warn_missing(&["DATABASE_URL"]);
        if let Ok(host) = env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
    }
    Ok(cfg)
}

fn bind_addr(cfg: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

async fn connect_and_migrate(cfg: &configs::DatabaseConfig) -> Result<DatabaseConnection, StartupError> {
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::from(cfg))
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::test_connection(&db).await.map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None).await.map_err(|e| StartupError::Database(e.to_string()))?;
    Ok(db)
}

/// Wire the blog service over an open connection.
pub fn build_app(db: DatabaseConnection, blog: &configs::BlogConfig) -> Router {
    let repo: Arc<dyn BlogRepository> = Arc::new(SeaOrmBlogRepository::new(db));
    let state = AppState::new(BlogService::new(repo, BlogConfig::from(blog)));
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;
    let db = connect_and_migrate(&cfg.database).await?;
    let app = build_app(db, &cfg.blog);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, date_format = %cfg.blog.date_format, "starting blog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let cfg = configs::ServerConfig { host: "0.0.0.0".into(), port: 8088, worker_threads: None };
        assert_eq!(bind_addr(&cfg).unwrap().port(), 8088);
    }

    #[test]
    fn bad_host_is_an_error() {
        let cfg = configs::ServerConfig { host: "not a host".into(), port: 1, worker_threads: None };
        assert!(bind_addr(&cfg).is_err());
    }
}
