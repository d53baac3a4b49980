//! Power entity and its partial update

use crate::error::ValidationError;
use crate::validation::{min_length, present};
use serde::{Deserialize, Serialize};

/// Minimum length for a power description, in characters
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// A power heroes can hold through [`crate::model::HeroPower`] rows.
///
/// The description is required and must be at least
/// [`MIN_DESCRIPTION_LEN`] characters; this holds on every set, whether the
/// power is being created or patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::FromRow))]
pub struct Power {
    /// Primary key, generated by the store
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl Power {
    /// Build a power, rejecting descriptions that violate the constraints
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let power = Self {
            id,
            name: name.into(),
            description: description.into(),
        };
        power.validate()?;
        Ok(power)
    }

    /// Check the description constraints without mutating anything
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        match present()("Description", &self.description) {
            Err(message) => errors.push(message),
            Ok(()) => {
                errors.check(min_length(MIN_DESCRIPTION_LEN)("Description", &self.description));
            }
        }
        errors.into_result()
    }

    /// Apply an allow-listed partial update, validating before the new
    /// values are accepted.
    ///
    /// Only `name` and `description` can be written; unknown payload keys
    /// never reach this point because [`PowerUpdate`] simply does not carry
    /// them. On failure the original power is untouched.
    pub fn apply_update(&self, update: &PowerUpdate) -> Result<Power, ValidationError> {
        let mut updated = self.clone();
        if let Some(name) = &update.name {
            updated.name = name.clone();
        }
        if let Some(description) = &update.description {
            updated.description = description.clone();
        }
        updated.validate()?;
        Ok(updated)
    }
}

/// Partial update for a power, as submitted to `PATCH /powers/{id}`.
///
/// Fields absent from the payload are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PowerUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
