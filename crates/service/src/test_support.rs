#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use uuid::Uuid;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub fn skip_db_tests() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok()
}

pub async fn test_db() -> DatabaseConnection {
    MIGRATED
        .get_or_init(|| async {
            let db = models::db::connect().await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
            drop(db);
        })
        .await;

    // Fresh connection bound to the current test's runtime
    models::db::connect().await.expect("connect db")
}

/// Insert a throwaway account and return its id. Emails are randomized so
/// tests can run concurrently against a shared database.
pub async fn create_test_account(db: &DatabaseConnection) -> Uuid {
    let email = format!("owner-{}@test.local", Uuid::new_v4());
    let account = models::account::create(db, &email, "not-a-real-hash", Some("Test Shop"))
        .await
        .expect("create test account");
    account.id
}
