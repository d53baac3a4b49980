//! Domain entities and their write-time validation
//!
//! Three related types mirror the relational schema:
//!
//! - [`Hero`]: owns a collection of [`HeroPower`] rows (cascade delete)
//! - [`Power`]: owns a collection of [`HeroPower`] rows (cascade delete)
//! - [`HeroPower`]: the association entity carrying a `strength` attribute
//!
//! Validation is enforced here, before a value reaches the store: a power
//! description must be at least 20 characters, and a strength must be one of
//! the fixed enumerated values.

mod hero;
mod hero_power;
mod power;

pub use hero::Hero;
pub use hero_power::{HeroPower, NewHeroPower, STRENGTH_VALUES};
pub use power::{Power, PowerUpdate, MIN_DESCRIPTION_LEN};
