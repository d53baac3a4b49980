//! # Heroes API
//!
//! A small CRUD HTTP/JSON service exposing three related entities: heroes,
//! powers, and the `hero_power` association linking them with a `strength`
//! attribute, backed by a relational store.
//!
//! ## Features
//!
//! - **Write-time validation**: field constraints are checked before a value
//!   is accepted into an entity, and surface as `400 {"errors": [...]}`
//! - **Controlled serialization**: related entities are embedded recursively,
//!   with exclusion paths preventing cyclic back-reference expansion and an
//!   allow-list "only" mode for list endpoints
//! - **Explicit cascades**: deleting a hero or power removes its association
//!   rows through explicit store functions, not implicit ORM magic
//! - **Pluggable storage**: an in-memory store by default, SQLite via `sqlx`
//!   behind the `sqlite` feature flag
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use heroes_api::prelude::*;
//!
//! let store = MemoryStore::new();
//! let app = build_router(AppState { store: Arc::new(store) });
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5555").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod serialize;
pub mod server;
pub mod store;
pub mod validation;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::config::AppConfig;
    pub use crate::error::{ApiError, ValidationError};
    pub use crate::model::{Hero, HeroPower, NewHeroPower, Power, PowerUpdate, STRENGTH_VALUES};

    // === Serialization ===
    pub use crate::serialize::{serialize_hero, serialize_hero_power, serialize_power};

    // === Storage ===
    #[cfg(feature = "sqlite")]
    pub use crate::store::SqliteStore;
    pub use crate::store::{HeroStore, MemoryStore};

    // === Server ===
    pub use crate::server::{build_router, AppState};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
