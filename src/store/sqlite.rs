//! SQLite storage backend using sqlx.
//!
//! Provides a `SqliteStore` implementation of [`HeroStore`] backed by a
//! SQLite database via `sqlx::SqlitePool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag:
//! ```toml
//! [dependencies]
//! heroes-api = { version = "0.1", features = ["sqlite"] }
//! ```
//!
//! # Schema
//!
//! Three tables mirror the domain model: `heroes`, `powers`, and the
//! association table `hero_powers` with foreign keys to both parents.
//! Cascade deletes are performed explicitly in the delete functions rather
//! than relying on `ON DELETE` triggers, so the behavior matches the
//! in-memory backend exactly.

use crate::model::{Hero, HeroPower, Power};
use crate::store::HeroStore;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required tables and indexes (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS heroes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            super_name TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create heroes table: {}", e))?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS powers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create powers table: {}", e))?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS hero_powers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            strength TEXT NOT NULL,
            hero_id INTEGER NOT NULL REFERENCES heroes(id),
            power_id INTEGER NOT NULL REFERENCES powers(id)
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create hero_powers table: {}", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_hero_powers_hero ON hero_powers (hero_id)")
        .execute(pool)
        .await
        .map_err(|e| anyhow!("Failed to create hero_powers index: {}", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_hero_powers_power ON hero_powers (power_id)")
        .execute(pool)
        .await
        .map_err(|e| anyhow!("Failed to create hero_powers index: {}", e))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// SqliteStore
// ---------------------------------------------------------------------------

/// Hero storage backed by SQLite.
///
/// # Example
///
/// ```rust,ignore
/// use sqlx::SqlitePool;
/// use heroes_api::store::{ensure_schema, SqliteStore};
///
/// let pool = SqlitePool::connect("sqlite://app.db").await?;
/// ensure_schema(&pool).await?;
/// let store = SqliteStore::new(pool);
/// ```
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl HeroStore for SqliteStore {
    async fn list_heroes(&self) -> Result<Vec<Hero>> {
        sqlx::query_as::<_, Hero>("SELECT id, name, super_name FROM heroes ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to list heroes: {}", e))
    }

    async fn get_hero(&self, id: i64) -> Result<Option<Hero>> {
        sqlx::query_as::<_, Hero>("SELECT id, name, super_name FROM heroes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to fetch hero {}: {}", id, e))
    }

    async fn create_hero(&self, name: &str, super_name: &str) -> Result<Hero> {
        let result = sqlx::query("INSERT INTO heroes (name, super_name) VALUES (?, ?)")
            .bind(name)
            .bind(super_name)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to insert hero: {}", e))?;

        Ok(Hero::new(result.last_insert_rowid(), name, super_name))
    }

    async fn delete_hero(&self, id: i64) -> Result<bool> {
        // cascade first so the association rows never dangle
        sqlx::query("DELETE FROM hero_powers WHERE hero_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to cascade hero {} deletion: {}", id, e))?;

        let result = sqlx::query("DELETE FROM heroes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete hero {}: {}", id, e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_powers(&self) -> Result<Vec<Power>> {
        sqlx::query_as::<_, Power>("SELECT id, name, description FROM powers ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to list powers: {}", e))
    }

    async fn get_power(&self, id: i64) -> Result<Option<Power>> {
        sqlx::query_as::<_, Power>("SELECT id, name, description FROM powers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to fetch power {}: {}", id, e))
    }

    async fn create_power(&self, name: &str, description: &str) -> Result<Power> {
        let result = sqlx::query("INSERT INTO powers (name, description) VALUES (?, ?)")
            .bind(name)
            .bind(description)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to insert power: {}", e))?;

        Ok(Power {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    async fn update_power(&self, power: &Power) -> Result<()> {
        let result = sqlx::query("UPDATE powers SET name = ?, description = ? WHERE id = ?")
            .bind(&power.name)
            .bind(&power.description)
            .bind(power.id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to update power {}: {}", power.id, e))?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Power {} not found", power.id));
        }

        Ok(())
    }

    async fn delete_power(&self, id: i64) -> Result<bool> {
        sqlx::query("DELETE FROM hero_powers WHERE power_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to cascade power {} deletion: {}", id, e))?;

        let result = sqlx::query("DELETE FROM powers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete power {}: {}", id, e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_hero_power(
        &self,
        strength: &str,
        hero_id: i64,
        power_id: i64,
    ) -> Result<HeroPower> {
        let result =
            sqlx::query("INSERT INTO hero_powers (strength, hero_id, power_id) VALUES (?, ?, ?)")
                .bind(strength)
                .bind(hero_id)
                .bind(power_id)
                .execute(&self.pool)
                .await
                .map_err(|e| anyhow!("Failed to insert hero_power: {}", e))?;

        Ok(HeroPower {
            id: result.last_insert_rowid(),
            strength: strength.to_string(),
            hero_id,
            power_id,
        })
    }

    async fn hero_powers_for_hero(&self, hero_id: i64) -> Result<Vec<HeroPower>> {
        sqlx::query_as::<_, HeroPower>(
            "SELECT id, strength, hero_id, power_id FROM hero_powers
             WHERE hero_id = ? ORDER BY id",
        )
        .bind(hero_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to list hero_powers for hero {}: {}", hero_id, e))
    }

    async fn hero_powers_for_power(&self, power_id: i64) -> Result<Vec<HeroPower>> {
        sqlx::query_as::<_, HeroPower>(
            "SELECT id, strength, hero_id, power_id FROM hero_powers
             WHERE power_id = ? ORDER BY id",
        )
        .bind(power_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to list hero_powers for power {}: {}", power_id, e))
    }
}
