//! HeroPower association entity
//!
//! The many-to-many row linking a hero to a power, carrying its own
//! `strength` attribute. Neither parent owns it exclusively; deleting either
//! parent cascades to delete the row.

use crate::error::ValidationError;
use crate::validation::one_of;
use serde::{Deserialize, Serialize};

/// Allowed values for the `strength` attribute
pub const STRENGTH_VALUES: &[&str] = &["Strong", "Weak", "Average"];

/// A persisted hero/power association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::FromRow))]
pub struct HeroPower {
    /// Primary key, generated by the store
    pub id: i64,
    /// One of [`STRENGTH_VALUES`]
    pub strength: String,
    pub hero_id: i64,
    pub power_id: i64,
}

/// Fields submitted to `POST /hero_powers`
#[derive(Debug, Clone, Deserialize)]
pub struct NewHeroPower {
    pub strength: String,
    pub hero_id: i64,
    pub power_id: i64,
}

impl NewHeroPower {
    /// Check the strength constraint, collecting into `errors`.
    ///
    /// Referential checks on `hero_id` / `power_id` happen against the store
    /// in the handler; only field-level constraints live here.
    pub fn validate(&self, errors: &mut ValidationError) {
        errors.check(one_of(STRENGTH_VALUES)("Strength", &self.strength));
    }
}
