//! SQLite-backed [`PartStore`] implementation.
//!
//! Every operation borrows a pooled connection for its own duration; the
//! read-modify-write in [`update`](PartStore::update) runs in a transaction
//! that rolls back when dropped on an error path.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::{Error, Result};
use crate::models::{NewPart, Part, PartUpdate};

use super::PartStore;

const SELECT_PART: &str =
    "SELECT id, name, sku, description, weight_ounces, is_active FROM part";

/// SQLite implementation of the [`PartStore`] trait.
///
/// Wraps a [`SqlitePool`] and maps each operation onto the `part` table
/// created by [`crate::migrate`].
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_part(row: &SqliteRow) -> Result<Part> {
    Ok(Part {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        sku: row.try_get("sku")?,
        description: row.try_get("description")?,
        weight_ounces: row.try_get("weight_ounces")?,
        is_active: row.try_get("is_active")?,
    })
}

/// Translate constraint violations into validation errors; anything else is
/// an internal failure.
fn map_write_error(err: sqlx::Error, sku: &str) -> Error {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return Error::validation(format!("Part with SKU '{}' already exists.", sku));
        }
        if db_err.is_check_violation() {
            return Error::validation("Weight must be non-negative.");
        }
    }
    Error::from(err)
}

#[async_trait]
impl PartStore for SqliteStore {
    async fn insert(&self, part: NewPart) -> Result<Part> {
        part.validate()?;

        let result = sqlx::query(
            r#"
            INSERT INTO part (name, sku, description, weight_ounces, is_active)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&part.name)
        .bind(&part.sku)
        .bind(&part.description)
        .bind(part.weight_ounces)
        .bind(part.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &part.sku))?;

        Ok(Part::from_new(result.last_insert_rowid(), part))
    }

    async fn get(&self, id: i64) -> Result<Option<Part>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_PART))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_part).transpose()
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Part>> {
        let rows = sqlx::query(&format!("{} ORDER BY id ASC LIMIT ? OFFSET ?", SELECT_PART))
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_part).collect()
    }

    async fn update(&self, id: i64, update: PartUpdate) -> Result<Option<Part>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_PART))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let mut part = match row {
            Some(row) => row_to_part(&row)?,
            None => return Ok(None),
        };

        // Absent ids report NotFound before the body is looked at.
        update.validate()?;
        if update.is_empty() {
            return Ok(Some(part));
        }
        part.apply(update);

        sqlx::query(
            r#"
            UPDATE part
            SET name = ?, sku = ?, description = ?, weight_ounces = ?, is_active = ?
            WHERE id = ?
            "#,
        )
        .bind(&part.name)
        .bind(&part.sku)
        .bind(&part.description)
        .bind(part.weight_ounces)
        .bind(part.is_active)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &part.sku))?;

        tx.commit().await?;
        Ok(Some(part))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM part WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    async fn descriptions(&self) -> Result<Vec<Option<String>>> {
        let rows = sqlx::query("SELECT description FROM part ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get("description").map_err(Error::from))
            .collect()
    }
}
