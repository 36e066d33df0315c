use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use crate::db;



/// Transaction handling and isolation tests
pub mod transaction_tests;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// Connected, migrated database or `None` when tests should be skipped
/// (`SKIP_DB_TESTS` set, no `DATABASE_URL`, or the server is unreachable).
pub(crate) async fn test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("skip: DATABASE_URL not set");
        return None;
    }
    let migrated = *MIGRATED
        .get_or_init(|| async {
            match db::connect().await {
                Ok(conn) => migration::Migrator::up(&conn, None).await.is_ok(),
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {}", e);
                    false
                }
            }
        })
        .await;
    if !migrated {
        return None;
    }
    db::connect().await.ok()
}

/// Unique, slug-safe suffix for test rows.
pub(crate) fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}
