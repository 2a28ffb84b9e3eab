//! HTTP-level tests for the activity editor.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, TestEnv};
use serde_json::json;

const CHIP_DOC: &str = r#"{
    "id": "ev1",
    "gacha_type": "筹码类",
    "items": [
        {"id": "Ship_A", "name": "甲", "type": "战舰", "rarity": "epic", "probability": 1.5, "limit": 1},
        {"id": "Ship_Z", "name": "无图", "type": "战舰", "rarity": "common", "probability": 0, "limit": 0}
    ]
}"#;

// ---------------------------------------------------------------------------
// Listing and loading
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_sorted_ids() {
    let env = TestEnv::new();
    env.activity("chip", "ev2", "{}").activity("chip", "ev1", "{}");

    let response = get(env.app(), "/api/activity/chip/list").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"], json!(["ev1", "ev2"]));
}

#[tokio::test]
async fn list_of_missing_kind_dir_is_empty() {
    let env = TestEnv::new();

    let json = body_json(get(env.app(), "/api/activity/cargo/list").await).await;

    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn unknown_kind_returns_400() {
    let env = TestEnv::new();

    let response = get(env.app(), "/api/activity/lottery/list").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_missing_activity_returns_404() {
    let env = TestEnv::new();

    let response = get(env.app(), "/api/activity/chip/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn get_malformed_activity_returns_500() {
    let env = TestEnv::new();
    env.activity("chip", "broken", "{not json");

    let response = get(env.app(), "/api/activity/chip/broken").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn get_injects_resolved_image_paths() {
    let env = TestEnv::new();
    env.activity("chip", "ev1", CHIP_DOC)
        .sprite("units_ships", "Ship_A.png");

    let json = body_json(get(env.app(), "/api/activity/chip/ev1").await).await;
    let items = json["data"]["items"].as_array().unwrap();

    assert!(items[0]["image_path"]
        .as_str()
        .unwrap()
        .ends_with("sprites/units_ships/Ship_A.png"));
    assert!(items[1].get("image_path").is_none());
    assert_eq!(json["data"]["gacha_type"], "筹码类");
}

#[tokio::test]
async fn flagship_items_inside_lootboxes_get_image_paths() {
    let env = TestEnv::new();
    env.sprite("flags", "Flag_1.png").activity(
        "flagship",
        "fs1",
        r#"{"lootboxes": [{"type": "A", "items": [{"id": "Flag_1", "type": "旗帜"}]}]}"#,
    );

    let json = body_json(get(env.app(), "/api/activity/flagship/fs1").await).await;

    assert!(json["data"]["lootboxes"][0]["items"][0]["image_path"].is_string());
}

// ---------------------------------------------------------------------------
// Saving
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_strips_image_paths_and_roundtrips() {
    let env = TestEnv::new();
    env.activity("chip", "ev1", CHIP_DOC)
        .sprite("units_ships", "Ship_A.png");

    let mut doc = body_json(get(env.app(), "/api/activity/chip/ev1").await).await["data"].clone();
    doc["items"][1]["probability"] = json!(2.5);

    let response = post_json(env.app(), "/api/activity/chip/ev1", doc).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let stored = env.read_json(&env.layout.activity_dir.join("chip").join("ev1.json"));
    assert!(stored["items"][0].get("image_path").is_none());
    assert_eq!(stored["items"][1]["probability"], 2.5);
    assert_eq!(stored["items"][0]["name"], "甲");

    // Image paths come back on the next load.
    let json = body_json(get(env.app(), "/api/activity/chip/ev1").await).await;
    assert!(json["data"]["items"][0]["image_path"].is_string());
}

#[tokio::test]
async fn save_creates_new_activity() {
    let env = TestEnv::new();

    let response = post_json(
        env.app(),
        "/api/activity/cargo/c1",
        json!({"cargos": [{"type": "gold", "items": []}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(env.app(), "/api/activity/cargo/list").await).await;
    assert_eq!(json["data"], json!(["c1"]));
}

#[tokio::test]
async fn save_non_object_returns_400() {
    let env = TestEnv::new();

    let response = post_json(env.app(), "/api/activity/chip/ev1", json!([1, 2])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Pool items
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pool_item_infers_type_from_category() {
    let env = TestEnv::new();

    let response = post_json(
        env.app(),
        "/api/activity/pool-item",
        json!({
            "item": {
                "id": "Gun_1",
                "image_path": "sprites/weapons/Gun_1.png",
                "data": {"name": "炮", "rarityTypeString": "传说"}
            },
            "category": "武器 - 主炮",
            "pool": []
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let item = &body_json(response).await["data"];
    assert_eq!(item["id"], "Gun_1");
    assert_eq!(item["name"], "炮");
    assert_eq!(item["type"], "主炮");
    assert_eq!(item["rarity"], "legendary");
    assert_eq!(item["probability"], 0.0);
    assert_eq!(item["limit"], 0);
}

#[tokio::test]
async fn pool_item_already_in_pool_returns_400() {
    let env = TestEnv::new();

    let response = post_json(
        env.app(),
        "/api/activity/pool-item",
        json!({
            "item": {"id": "gold", "name": "金币", "type": "资源"},
            "pool": [{"id": "gold", "name": "金币", "type": "资源", "rarity": "common"}]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "DUPLICATE");
}

#[tokio::test]
async fn pool_item_accepts_loosely_typed_pool_entries() {
    let env = TestEnv::new();

    let response = post_json(
        env.app(),
        "/api/activity/pool-item",
        json!({
            "item": {"id": "gold", "name": "金币", "type": "资源"},
            "pool": [
                {"id": "a", "type": "资源"},
                {"id": "b", "name": "B", "type": "道具", "rarity": "rare", "limit": 1.5},
                {"name": "no id"}
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], "gold");
}

#[tokio::test]
async fn pool_item_duplicate_is_found_among_partial_entries() {
    let env = TestEnv::new();

    let response = post_json(
        env.app(),
        "/api/activity/pool-item",
        json!({
            "item": {"id": "b", "name": "B", "type": "道具"},
            "pool": [{"id": "b", "limit": 1.5}]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "DUPLICATE");
}
