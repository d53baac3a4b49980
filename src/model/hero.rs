//! Hero entity

use serde::{Deserialize, Serialize};

/// A hero with a secret identity.
///
/// Heroes have no write-time constraints of their own; their association
/// rows are removed by the store's explicit cascade when a hero is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::FromRow))]
pub struct Hero {
    /// Primary key, generated by the store
    pub id: i64,
    pub name: String,
    pub super_name: String,
}

impl Hero {
    pub fn new(id: i64, name: impl Into<String>, super_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            super_name: super_name.into(),
        }
    }
}
