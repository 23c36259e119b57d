//! Database module
//!
//! Pool construction and schema verification. Schema lives in raw SQL files
//! under migrations/.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

/// Connect a pool and verify the database is reachable.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

/// Check if required tables and seed rows exist.
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let required_tables = ["accounts", "operation_types", "transactions"];

    for table in required_tables {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    // The closed operation-kind set must be seeded.
    let kinds: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM operation_types WHERE id IN (1, 2, 3, 4)")
            .fetch_one(pool)
            .await?;

    if kinds != 4 {
        tracing::error!(
            "operation_types is missing seed rows ({}/4 present). Please run migrations.",
            kinds
        );
        return Ok(false);
    }

    Ok(true)
}
