//! Common test utilities

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

/// Connect to the test database and make sure the schema is applied.
///
/// Tests isolate themselves through unique document numbers rather than
/// truncation, so suites can run in parallel against one database.
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    // The migration file is idempotent.
    pool.execute(include_str!("../../migrations/0001_init.sql"))
        .await
        .expect("Failed to apply schema");

    pool
}

/// Create an account with a unique document number, returning its id.
#[allow(dead_code)]
pub async fn create_test_account(pool: &PgPool) -> i64 {
    let document_number = format!("doc-{}", uuid::Uuid::new_v4());
    sqlx::query_scalar("INSERT INTO accounts (document_number) VALUES ($1) RETURNING id")
        .bind(document_number)
        .fetch_one(pool)
        .await
        .expect("Failed to create test account")
}
