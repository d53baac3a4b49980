//! End-to-end HTTP tests against the real router with the in-memory store
//!
//! These exercise the full request path: routing, extraction, validation,
//! persistence, and serialization, including every error body shape.

use axum_test::TestServer;
use heroes_api::model::{Hero, HeroPower, Power};
use heroes_api::server::{build_router, AppState};
use heroes_api::store::{HeroStore, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;

struct TestApp {
    server: TestServer,
    store: Arc<MemoryStore>,
}

fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let app = build_router(AppState {
        store: store.clone(),
    });
    TestApp {
        server: TestServer::new(app),
        store,
    }
}

/// Two heroes, two powers, one association: hero 1 holds power 1 (Strong)
async fn seed(store: &MemoryStore) -> (Vec<Hero>, Vec<Power>, HeroPower) {
    let kamala = store.create_hero("Kamala Khan", "Ms. Marvel").await.unwrap();
    let jean = store.create_hero("Jean Grey", "Dark Phoenix").await.unwrap();
    let flight = store
        .create_power("flight", "gives the wielder the ability to fly")
        .await
        .unwrap();
    let strength = store
        .create_power("super strength", "gives the wielder super-human strength")
        .await
        .unwrap();
    let hero_power = store
        .create_hero_power("Strong", kamala.id, flight.id)
        .await
        .unwrap();
    (vec![kamala, jean], vec![flight, strength], hero_power)
}

// =============================================================================
// Heroes
// =============================================================================

#[tokio::test]
async fn test_list_heroes_returns_summaries_only() {
    let app = test_app();
    seed(&app.store).await;

    let response = app.server.get("/heroes").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body,
        json!([
            { "id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel" },
            { "id": 2, "name": "Jean Grey", "super_name": "Dark Phoenix" }
        ])
    );
}

#[tokio::test]
async fn test_list_heroes_empty_store_returns_empty_array() {
    let app = test_app();
    let response = app.server.get("/heroes").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_get_hero_includes_nested_powers_without_backreference() {
    let app = test_app();
    let (heroes, powers, hero_power) = seed(&app.store).await;

    let response = app.server.get(&format!("/heroes/{}", heroes[0].id)).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], heroes[0].id);
    assert_eq!(body["super_name"], "Ms. Marvel");

    let rows = body["hero_powers"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], hero_power.id);
    assert_eq!(rows[0]["strength"], "Strong");
    assert_eq!(rows[0]["power"]["name"], powers[0].name);
    assert!(
        rows[0].get("hero").is_none(),
        "nested hero_power must not expand its parent hero"
    );
}

#[tokio::test]
async fn test_get_hero_without_powers_has_empty_collection() {
    let app = test_app();
    let (heroes, _, _) = seed(&app.store).await;

    let response = app.server.get(&format!("/heroes/{}", heroes[1].id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["hero_powers"], json!([]));
}

#[tokio::test]
async fn test_get_unknown_hero_returns_404_with_fixed_body() {
    let app = test_app();
    let response = app.server.get("/heroes/999").await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>(), json!({ "error": "Hero not found" }));
}

// =============================================================================
// Powers
// =============================================================================

#[tokio::test]
async fn test_list_powers_returns_summaries_only() {
    let app = test_app();
    seed(&app.store).await;

    let response = app.server.get("/powers").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body,
        json!([
            { "id": 1, "name": "flight", "description": "gives the wielder the ability to fly" },
            { "id": 2, "name": "super strength", "description": "gives the wielder super-human strength" }
        ])
    );
}

#[tokio::test]
async fn test_get_power_includes_holders_without_backreference() {
    let app = test_app();
    let (heroes, powers, _) = seed(&app.store).await;

    let response = app.server.get(&format!("/powers/{}", powers[0].id)).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["name"], "flight");

    let rows = body["hero_powers"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["hero"]["name"], heroes[0].name);
    assert!(rows[0].get("power").is_none());
}

#[tokio::test]
async fn test_get_unknown_power_returns_404_with_fixed_body() {
    let app = test_app();
    let response = app.server.get("/powers/999").await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>(), json!({ "error": "Power not found" }));
}

#[tokio::test]
async fn test_patch_power_name_returns_updated_record() {
    let app = test_app();
    let (_, powers, _) = seed(&app.store).await;

    let response = app
        .server
        .patch(&format!("/powers/{}", powers[0].id))
        .json(&json!({ "name": "super flight" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], powers[0].id);
    assert_eq!(body["name"], "super flight");
    assert_eq!(body["description"], powers[0].description);

    // the change is persisted
    let fetched = app.store.get_power(powers[0].id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "super flight");
}

#[tokio::test]
async fn test_patch_power_valid_description_is_accepted() {
    let app = test_app();
    let (_, powers, _) = seed(&app.store).await;

    let response = app
        .server
        .patch(&format!("/powers/{}", powers[1].id))
        .json(&json!({ "description": "lets the wielder lift objects of any weight" }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_patch_power_short_description_returns_400() {
    let app = test_app();
    let (_, powers, _) = seed(&app.store).await;

    let response = app
        .server
        .patch(&format!("/powers/{}", powers[0].id))
        .json(&json!({ "description": "short" }))
        .await;
    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>(),
        json!({ "errors": ["Description must be at least 20 characters long"] })
    );

    // the original value survives a rejected write
    let fetched = app.store.get_power(powers[0].id).await.unwrap().unwrap();
    assert_eq!(fetched.description, powers[0].description);
}

#[tokio::test]
async fn test_patch_unknown_power_returns_404() {
    let app = test_app();
    let response = app
        .server
        .patch("/powers/999")
        .json(&json!({ "name": "x" }))
        .await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>(), json!({ "error": "Power not found" }));
}

// =============================================================================
// HeroPowers
// =============================================================================

#[tokio::test]
async fn test_create_hero_power_returns_201_with_both_parents() {
    let app = test_app();
    let (heroes, powers, _) = seed(&app.store).await;

    let response = app
        .server
        .post("/hero_powers")
        .json(&json!({
            "strength": "Average",
            "hero_id": heroes[1].id,
            "power_id": powers[1].id
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["strength"], "Average");
    assert_eq!(body["hero_id"], heroes[1].id);
    assert_eq!(body["power_id"], powers[1].id);
    assert_eq!(body["hero"]["super_name"], "Dark Phoenix");
    assert_eq!(body["power"]["name"], "super strength");
    assert!(body["hero"].get("hero_powers").is_none());
    assert!(body["power"].get("hero_powers").is_none());
}

#[tokio::test]
async fn test_created_hero_power_shows_up_in_hero_detail() {
    let app = test_app();
    let (heroes, powers, _) = seed(&app.store).await;

    app.server
        .post("/hero_powers")
        .json(&json!({
            "strength": "Weak",
            "hero_id": heroes[1].id,
            "power_id": powers[0].id
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let detail: Value = app
        .server
        .get(&format!("/heroes/{}", heroes[1].id))
        .await
        .json();
    let rows = detail["hero_powers"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["strength"], "Weak");
    assert_eq!(rows[0]["power"]["name"], "flight");
}

#[tokio::test]
async fn test_create_hero_power_invalid_strength_returns_400() {
    let app = test_app();
    let (heroes, powers, _) = seed(&app.store).await;

    let response = app
        .server
        .post("/hero_powers")
        .json(&json!({
            "strength": "Flying",
            "hero_id": heroes[0].id,
            "power_id": powers[0].id
        }))
        .await;
    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>(),
        json!({ "errors": ["Strength must be one of the following values: 'Strong', 'Weak', 'Average'"] })
    );
}

#[tokio::test]
async fn test_create_hero_power_unknown_parents_returns_400_with_all_errors() {
    let app = test_app();
    seed(&app.store).await;

    let response = app
        .server
        .post("/hero_powers")
        .json(&json!({ "strength": "Flying", "hero_id": 998, "power_id": 999 }))
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
    assert!(errors
        .iter()
        .any(|e| e.as_str() == Some("hero_id must reference an existing hero")));
    assert!(errors
        .iter()
        .any(|e| e.as_str() == Some("power_id must reference an existing power")));
}

#[tokio::test]
async fn test_rejected_hero_power_is_not_persisted() {
    let app = test_app();
    let (heroes, powers, _) = seed(&app.store).await;

    app.server
        .post("/hero_powers")
        .json(&json!({
            "strength": "Flying",
            "hero_id": heroes[1].id,
            "power_id": powers[1].id
        }))
        .await
        .assert_status_bad_request();

    let rows = app.store.hero_powers_for_hero(heroes[1].id).await.unwrap();
    assert!(rows.is_empty());
}

// =============================================================================
// Index
// =============================================================================

#[tokio::test]
async fn test_index_serves_html() {
    let app = test_app();
    let response = app.server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("Heroes API"));
}
