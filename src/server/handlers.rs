//! HTTP handlers for the hero, power, and hero_power endpoints
//!
//! Handlers are stateless request/response: each one reads or writes through
//! the shared store, serializes the result with the appropriate exclusion
//! paths, and maps failures onto [`ApiError`]. Validation always runs before
//! anything is persisted.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ApiError, ValidationError};
use crate::model::{Hero, HeroPower, NewHeroPower, Power, PowerUpdate};
use crate::serialize::{serialize_hero, serialize_hero_power, serialize_power};
use crate::store::HeroStore;

/// Exclusions keeping nested association rows from re-expanding their parent
const HERO_DETAIL_EXCLUDE: &[&str] = &["hero_powers.hero"];
const POWER_DETAIL_EXCLUDE: &[&str] = &["hero_powers.power"];
const HERO_POWER_EXCLUDE: &[&str] = &["hero.hero_powers", "power.hero_powers"];

/// Allow-lists for the list endpoints
const HERO_SUMMARY_FIELDS: &[&str] = &["id", "name", "super_name"];
const POWER_SUMMARY_FIELDS: &[&str] = &["id", "name", "description"];

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HeroStore>,
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html("<h1>Heroes API</h1>")
}

/// GET /heroes
///
/// Returns hero summaries restricted to the allow-listed fields.
pub async fn list_heroes(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let heroes = state.store.list_heroes().await?;
    let records: Vec<Value> = heroes
        .iter()
        .map(|hero| serialize_hero(hero, None, &[], Some(HERO_SUMMARY_FIELDS)))
        .collect();
    Ok(Json(Value::Array(records)))
}

/// GET /heroes/{id}
///
/// Returns the full hero with nested association rows, each carrying its
/// power but never a back-reference to this hero.
pub async fn get_hero(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let hero = state
        .store
        .get_hero(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Hero" })?;

    let rows = hero_powers_with_powers(&state, id).await?;
    Ok(Json(serialize_hero(
        &hero,
        Some(&rows),
        HERO_DETAIL_EXCLUDE,
        None,
    )))
}

/// GET /powers
pub async fn list_powers(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let powers = state.store.list_powers().await?;
    let records: Vec<Value> = powers
        .iter()
        .map(|power| serialize_power(power, None, &[], Some(POWER_SUMMARY_FIELDS)))
        .collect();
    Ok(Json(Value::Array(records)))
}

/// GET /powers/{id}
pub async fn get_power(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let power = state
        .store
        .get_power(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Power" })?;

    let rows = hero_powers_with_heroes(&state, id).await?;
    Ok(Json(serialize_power(
        &power,
        Some(&rows),
        POWER_DETAIL_EXCLUDE,
        None,
    )))
}

/// PATCH /powers/{id}
///
/// Applies an allow-listed partial update, re-validates, persists, and
/// returns the updated record. 404 when the power does not exist, 400 with
/// the message list when validation fails.
pub async fn update_power(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<PowerUpdate>,
) -> Result<Json<Value>, ApiError> {
    let power = state
        .store
        .get_power(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Power" })?;

    let updated = power.apply_update(&update)?;
    state.store.update_power(&updated).await?;

    let rows = hero_powers_with_heroes(&state, id).await?;
    Ok(Json(serialize_power(
        &updated,
        Some(&rows),
        POWER_DETAIL_EXCLUDE,
        None,
    )))
}

/// POST /hero_powers
///
/// Validates the strength value and the referenced parents, persists the
/// association, and returns 201 with the record nested between both parents.
pub async fn create_hero_power(
    State(state): State<AppState>,
    Json(new): Json<NewHeroPower>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut errors = ValidationError::new();
    new.validate(&mut errors);

    let hero = state.store.get_hero(new.hero_id).await?;
    if hero.is_none() {
        errors.push("hero_id must reference an existing hero");
    }
    let power = state.store.get_power(new.power_id).await?;
    if power.is_none() {
        errors.push("power_id must reference an existing power");
    }
    errors.into_result()?;

    // both parents exist past this point
    let (Some(hero), Some(power)) = (hero, power) else {
        return Err(ApiError::Internal(anyhow::anyhow!(
            "parent lookup inconsistent for hero_power create"
        )));
    };
    let hero_power = state
        .store
        .create_hero_power(&new.strength, new.hero_id, new.power_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serialize_hero_power(
            &hero_power,
            Some(&hero),
            Some(&power),
            HERO_POWER_EXCLUDE,
        )),
    ))
}

/// Join a hero's association rows with their powers
async fn hero_powers_with_powers(
    state: &AppState,
    hero_id: i64,
) -> Result<Vec<(HeroPower, Power)>, ApiError> {
    let rows = state.store.hero_powers_for_hero(hero_id).await?;
    let mut joined = Vec::with_capacity(rows.len());
    for row in rows {
        let power = state
            .store
            .get_power(row.power_id)
            .await?
            .ok_or_else(|| dangling(&row, "power", row.power_id))?;
        joined.push((row, power));
    }
    Ok(joined)
}

/// Join a power's association rows with their heroes
async fn hero_powers_with_heroes(
    state: &AppState,
    power_id: i64,
) -> Result<Vec<(HeroPower, Hero)>, ApiError> {
    let rows = state.store.hero_powers_for_power(power_id).await?;
    let mut joined = Vec::with_capacity(rows.len());
    for row in rows {
        let hero = state
            .store
            .get_hero(row.hero_id)
            .await?
            .ok_or_else(|| dangling(&row, "hero", row.hero_id))?;
        joined.push((row, hero));
    }
    Ok(joined)
}

/// A foreign key pointing at nothing means the cascade invariant was broken
fn dangling(row: &HeroPower, parent: &str, parent_id: i64) -> ApiError {
    ApiError::Internal(anyhow::anyhow!(
        "hero_power {} references missing {} {}",
        row.id,
        parent,
        parent_id
    ))
}
