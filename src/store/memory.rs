//! In-memory implementation of HeroStore for testing and development

use crate::model::{Hero, HeroPower, Power};
use crate::store::HeroStore;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory hero store implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access,
/// with one map and one id counter per table, mirroring the relational
/// schema's per-table autoincrement keys.
#[derive(Clone, Default)]
pub struct MemoryStore {
    heroes: Arc<RwLock<HashMap<i64, Hero>>>,
    powers: Arc<RwLock<HashMap<i64, Power>>>,
    hero_powers: Arc<RwLock<HashMap<i64, HeroPower>>>,
    next_hero_id: Arc<AtomicI64>,
    next_power_id: Arc<AtomicI64>,
    next_hero_power_id: Arc<AtomicI64>,
}

impl MemoryStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_id<T>(mut items: Vec<T>, id: impl Fn(&T) -> i64) -> Vec<T> {
    items.sort_by_key(id);
    items
}

#[async_trait]
impl HeroStore for MemoryStore {
    async fn list_heroes(&self) -> Result<Vec<Hero>> {
        let heroes = self
            .heroes
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(sorted_by_id(heroes.values().cloned().collect(), |h| h.id))
    }

    async fn get_hero(&self, id: i64) -> Result<Option<Hero>> {
        let heroes = self
            .heroes
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(heroes.get(&id).cloned())
    }

    async fn create_hero(&self, name: &str, super_name: &str) -> Result<Hero> {
        let mut heroes = self
            .heroes
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = self.next_hero_id.fetch_add(1, Ordering::SeqCst) + 1;
        let hero = Hero::new(id, name, super_name);
        heroes.insert(id, hero.clone());

        Ok(hero)
    }

    async fn delete_hero(&self, id: i64) -> Result<bool> {
        let mut heroes = self
            .heroes
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let existed = heroes.remove(&id).is_some();
        if existed {
            // explicit cascade to the association rows
            let mut hero_powers = self
                .hero_powers
                .write()
                .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
            hero_powers.retain(|_, hp| hp.hero_id != id);
        }

        Ok(existed)
    }

    async fn list_powers(&self) -> Result<Vec<Power>> {
        let powers = self
            .powers
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(sorted_by_id(powers.values().cloned().collect(), |p| p.id))
    }

    async fn get_power(&self, id: i64) -> Result<Option<Power>> {
        let powers = self
            .powers
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(powers.get(&id).cloned())
    }

    async fn create_power(&self, name: &str, description: &str) -> Result<Power> {
        let mut powers = self
            .powers
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = self.next_power_id.fetch_add(1, Ordering::SeqCst) + 1;
        let power = Power {
            id,
            name: name.to_string(),
            description: description.to_string(),
        };
        powers.insert(id, power.clone());

        Ok(power)
    }

    async fn update_power(&self, power: &Power) -> Result<()> {
        let mut powers = self
            .powers
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        powers
            .get_mut(&power.id)
            .ok_or_else(|| anyhow!("Power {} not found", power.id))?;

        powers.insert(power.id, power.clone());

        Ok(())
    }

    async fn delete_power(&self, id: i64) -> Result<bool> {
        let mut powers = self
            .powers
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let existed = powers.remove(&id).is_some();
        if existed {
            let mut hero_powers = self
                .hero_powers
                .write()
                .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
            hero_powers.retain(|_, hp| hp.power_id != id);
        }

        Ok(existed)
    }

    async fn create_hero_power(
        &self,
        strength: &str,
        hero_id: i64,
        power_id: i64,
    ) -> Result<HeroPower> {
        let mut hero_powers = self
            .hero_powers
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = self.next_hero_power_id.fetch_add(1, Ordering::SeqCst) + 1;
        let hero_power = HeroPower {
            id,
            strength: strength.to_string(),
            hero_id,
            power_id,
        };
        hero_powers.insert(id, hero_power.clone());

        Ok(hero_power)
    }

    async fn hero_powers_for_hero(&self, hero_id: i64) -> Result<Vec<HeroPower>> {
        let hero_powers = self
            .hero_powers
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(sorted_by_id(
            hero_powers
                .values()
                .filter(|hp| hp.hero_id == hero_id)
                .cloned()
                .collect(),
            |hp| hp.id,
        ))
    }

    async fn hero_powers_for_power(&self, power_id: i64) -> Result<Vec<HeroPower>> {
        let hero_powers = self
            .hero_powers
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(sorted_by_id(
            hero_powers
                .values()
                .filter(|hp| hp.power_id == power_id)
                .cloned()
                .collect(),
            |hp| hp.id,
        ))
    }
}
