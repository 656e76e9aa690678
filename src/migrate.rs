use anyhow::Result;
use sqlx::SqlitePool;

/// Create the `part` table and its indexes. Safe to run repeatedly.
///
/// `AUTOINCREMENT` keeps SQLite from reusing the id of a deleted row.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS part (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(150) NOT NULL,
            sku VARCHAR(30) NOT NULL UNIQUE,
            description VARCHAR(1024),
            weight_ounces INTEGER NOT NULL CHECK (weight_ounces >= 0),
            is_active BOOLEAN NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_part_sku ON part(sku)")
        .execute(pool)
        .await?;

    tracing::debug!("migrations applied");
    Ok(())
}
