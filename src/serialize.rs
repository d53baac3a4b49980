//! Controlled serialization of entities to JSON records
//!
//! Each entity gets an explicit serialization function producing a mapping
//! from field name to value, recursively embedding related entities. Two
//! controls keep output bounded:
//!
//! - **Exclusion paths**: dotted paths such as `"hero_powers.hero"` prevent
//!   a nested record from re-expanding a back-reference to its parent, which
//!   would otherwise cycle forever. When recursion enters a relation field,
//!   the matching path prefix is stripped and the remainder applies to the
//!   nested record.
//! - **Only mode**: an allow-list of top-level field names for list
//!   endpoints, trading completeness for payload size.
//!
//! Relation data is passed in explicitly (the store is flat, there is no
//! lazy loading); a relation field is emitted only when its rows were
//! provided and the field is not excluded.

use crate::model::{Hero, HeroPower, Power};
use serde_json::{Map, Value};

/// Serialize a hero, optionally with its association rows.
///
/// Each provided `(hero_power, power)` pair is embedded under
/// `"hero_powers"`, the power nested inside its row. Pass
/// `exclude = &["hero_powers.hero"]` to keep nested rows from carrying a
/// back-reference to this hero.
pub fn serialize_hero(
    hero: &Hero,
    hero_powers: Option<&[(HeroPower, Power)]>,
    exclude: &[&str],
    only: Option<&[&str]>,
) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), hero.id.into());
    map.insert("name".to_string(), hero.name.clone().into());
    map.insert("super_name".to_string(), hero.super_name.clone().into());

    if let Some(rows) = hero_powers {
        if !is_excluded(exclude, "hero_powers") {
            let nested = nested_exclusions(exclude, "hero_powers");
            let rows: Vec<Value> = rows
                .iter()
                .map(|(hero_power, power)| {
                    serialize_hero_power(hero_power, Some(hero), Some(power), &nested)
                })
                .collect();
            map.insert("hero_powers".to_string(), Value::Array(rows));
        }
    }

    apply_only(map, only)
}

/// Serialize a power, optionally with its association rows.
///
/// Mirror image of [`serialize_hero`]: pairs are `(hero_power, hero)` and
/// the usual exclusion is `"hero_powers.power"`.
pub fn serialize_power(
    power: &Power,
    hero_powers: Option<&[(HeroPower, Hero)]>,
    exclude: &[&str],
    only: Option<&[&str]>,
) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), power.id.into());
    map.insert("name".to_string(), power.name.clone().into());
    map.insert("description".to_string(), power.description.clone().into());

    if let Some(rows) = hero_powers {
        if !is_excluded(exclude, "hero_powers") {
            let nested = nested_exclusions(exclude, "hero_powers");
            let rows: Vec<Value> = rows
                .iter()
                .map(|(hero_power, hero)| {
                    serialize_hero_power(hero_power, Some(hero), Some(power), &nested)
                })
                .collect();
            map.insert("hero_powers".to_string(), Value::Array(rows));
        }
    }

    apply_only(map, only)
}

/// Serialize an association row, optionally embedding its parents.
///
/// A parent is emitted only when provided and not excluded; embedded parents
/// never re-expand their own `hero_powers` collections (the nested
/// exclusions are forwarded, and no rows are passed down).
pub fn serialize_hero_power(
    hero_power: &HeroPower,
    hero: Option<&Hero>,
    power: Option<&Power>,
    exclude: &[&str],
) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), hero_power.id.into());
    map.insert("strength".to_string(), hero_power.strength.clone().into());
    map.insert("hero_id".to_string(), hero_power.hero_id.into());
    map.insert("power_id".to_string(), hero_power.power_id.into());

    if let Some(hero) = hero {
        if !is_excluded(exclude, "hero") {
            let nested = nested_exclusions(exclude, "hero");
            map.insert(
                "hero".to_string(),
                serialize_hero(hero, None, &nested, None),
            );
        }
    }
    if let Some(power) = power {
        if !is_excluded(exclude, "power") {
            let nested = nested_exclusions(exclude, "power");
            map.insert(
                "power".to_string(),
                serialize_power(power, None, &nested, None),
            );
        }
    }

    Value::Object(map)
}

/// Whether `field` itself is excluded at this nesting level
fn is_excluded(exclude: &[&str], field: &str) -> bool {
    exclude.iter().any(|path| *path == field)
}

/// Exclusion paths that apply one level down, inside `field`
fn nested_exclusions<'a>(exclude: &[&'a str], field: &str) -> Vec<&'a str> {
    exclude
        .iter()
        .filter_map(|path| {
            path.strip_prefix(field)
                .and_then(|rest| rest.strip_prefix('.'))
        })
        .collect()
}

/// Restrict a record to an allow-list of top-level fields, if given
fn apply_only(map: Map<String, Value>, only: Option<&[&str]>) -> Value {
    match only {
        None => Value::Object(map),
        Some(fields) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| fields.contains(&key.as_str()))
                .collect(),
        ),
    }
}
