//! Storage backends for heroes, powers, and their associations
//!
//! The [`HeroStore`] trait is the persistence seam: handlers hold an
//! `Arc<dyn HeroStore>` and never know which backend is behind it. The
//! in-memory store is always available; the SQLite backend is gated behind
//! the `sqlite` feature flag.

use crate::model::{Hero, HeroPower, Power};
use anyhow::Result;
use async_trait::async_trait;

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::{ensure_schema, SqliteStore};

/// Persistence operations for the three tables.
///
/// The store is responsible for id generation and for the explicit cascade
/// deletes; validation and referential checks happen above it, in the model
/// and handler layers. All listing is ordered by id so responses are stable.
#[async_trait]
pub trait HeroStore: Send + Sync {
    // === Heroes ===

    async fn list_heroes(&self) -> Result<Vec<Hero>>;
    async fn get_hero(&self, id: i64) -> Result<Option<Hero>>;
    async fn create_hero(&self, name: &str, super_name: &str) -> Result<Hero>;

    /// Delete a hero and cascade to its association rows.
    ///
    /// Returns `false` when no hero with that id existed.
    async fn delete_hero(&self, id: i64) -> Result<bool>;

    // === Powers ===

    async fn list_powers(&self) -> Result<Vec<Power>>;
    async fn get_power(&self, id: i64) -> Result<Option<Power>>;
    async fn create_power(&self, name: &str, description: &str) -> Result<Power>;

    /// Persist an already-validated power under its existing id
    async fn update_power(&self, power: &Power) -> Result<()>;

    /// Delete a power and cascade to its association rows.
    ///
    /// Returns `false` when no power with that id existed.
    async fn delete_power(&self, id: i64) -> Result<bool>;

    // === HeroPowers ===

    async fn create_hero_power(
        &self,
        strength: &str,
        hero_id: i64,
        power_id: i64,
    ) -> Result<HeroPower>;
    async fn hero_powers_for_hero(&self, hero_id: i64) -> Result<Vec<HeroPower>>;
    async fn hero_powers_for_power(&self, power_id: i64) -> Result<Vec<HeroPower>>;
}
