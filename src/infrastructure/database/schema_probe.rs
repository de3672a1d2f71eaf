//! Runtime checks for table/column existence.
//!
//! Migrations run before the listener binds, so under normal operation these
//! probes always report ready. They exist so a freshly deployed environment
//! with pending migrations degrades to empty lists with a notice instead of
//! failing every request. A probe that itself errors counts as not ready.

use sqlx::PgPool;

pub async fn table_exists(pool: &PgPool, table: &str) -> bool {
    let probe = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = 'public' AND table_name = $1
         )",
    )
    .bind(table)
    .fetch_one(pool)
    .await;

    match probe {
        Ok(exists) => exists,
        Err(e) => {
            tracing::warn!(table, error = %e, "schema probe failed, treating table as missing");
            false
        }
    }
}

pub async fn table_has_column(pool: &PgPool, table: &str, column: &str) -> bool {
    let probe = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (
            SELECT 1 FROM information_schema.columns
            WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2
         )",
    )
    .bind(table)
    .bind(column)
    .fetch_one(pool)
    .await;

    match probe {
        Ok(exists) => exists,
        Err(e) => {
            tracing::warn!(table, column, error = %e, "schema probe failed, treating column as missing");
            false
        }
    }
}
