use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{NewValue, ValueId, ValueRecord, ValueUpdate};

const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        // Every in-memory connection is its own database.
        let max_connections = if database_url.starts_with(MEMORY_URL) {
            1
        } else {
            5
        };

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open sqlite database '{database_url}'"))?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn create_value(&self, value: &NewValue) -> Result<ValueRecord> {
        let row = sqlx::query(
            "INSERT INTO life_values (name, description) VALUES (?, ?)
             RETURNING id, name, description",
        )
        .bind(&value.name)
        .bind(value.description.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(value_from_row(&row))
    }

    /// All values in insertion (id) order.
    pub async fn list_values(&self) -> Result<Vec<ValueRecord>> {
        let rows = sqlx::query("SELECT id, name, description FROM life_values ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(value_from_row).collect())
    }

    pub async fn get_value(&self, value_id: ValueId) -> Result<Option<ValueRecord>> {
        let row = sqlx::query("SELECT id, name, description FROM life_values WHERE id = ?")
            .bind(value_id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(value_from_row))
    }

    /// Applies the fields present in `update`. Returns `None` when no row matches.
    pub async fn update_value(
        &self,
        value_id: ValueId,
        update: &ValueUpdate,
    ) -> Result<Option<ValueRecord>> {
        let row = sqlx::query(
            "UPDATE life_values
             SET name = COALESCE(?, name),
                 description = COALESCE(?, description)
             WHERE id = ?
             RETURNING id, name, description",
        )
        .bind(update.name.as_deref())
        .bind(update.description.as_deref())
        .bind(value_id.0)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(value_from_row))
    }

    pub async fn delete_value(&self, value_id: ValueId) -> Result<Option<ValueRecord>> {
        let row = sqlx::query(
            "DELETE FROM life_values WHERE id = ? RETURNING id, name, description",
        )
        .bind(value_id.0)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(value_from_row))
    }
}

fn value_from_row(row: &SqliteRow) -> ValueRecord {
    ValueRecord {
        id: ValueId(row.get::<i64, _>(0)),
        name: row.get::<String, _>(1),
        description: row.get::<Option<String>, _>(2),
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with(MEMORY_URL) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
