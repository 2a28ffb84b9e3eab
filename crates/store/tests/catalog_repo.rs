//! Integration tests for `CatalogRepo` against temporary directory trees.

mod common;

use common::Fixture;
use mwres_core::catalog::{ItemSource, NEW_DATA_LABEL, RECORDED_LABEL};
use mwres_store::repositories::{CatalogRepo, NewDataRepo};

const SHIPS_CSV: &str = "id,name,typeString\nShip_A,甲,战舰\nship_b,乙,战舰\n,空,战舰\n";

// ---------------------------------------------------------------------------
// Test: category tree mirrors the CSV tree and skips excluded files
// ---------------------------------------------------------------------------

#[tokio::test]
async fn categories_mirror_csv_tree() {
    let fx = Fixture::new();
    fx.csv("战舰.csv", SHIPS_CSV)
        .csv("武器/主炮.csv", "id,name\nGun_1,炮\n")
        .csv("武器/导弹.csv", "id,name\nMissile_1,弹\n")
        .csv("活动.csv", "id\nx\n");

    let resolver = fx.layout.resolver();
    let tree = CatalogRepo::scan_categories(&fx.layout, &resolver).await.unwrap();

    assert!(tree.get("活动").is_none());
    assert_eq!(tree["战舰"].path.as_deref(), Some("战舰.csv"));

    let weapons = &tree["武器"];
    assert_eq!(weapons.path, None);
    let subs: Vec<_> = weapons.subcategories.iter().map(|s| s.path.as_str()).collect();
    assert_eq!(subs, vec!["武器/主炮.csv", "武器/导弹.csv"]);
}

// ---------------------------------------------------------------------------
// Test: new data ignores ids known case-insensitively, thumbnails, exclusions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_data_excludes_known_ids_case_insensitively() {
    let fx = Fixture::new();
    fx.csv("战舰.csv", SHIPS_CSV)
        .sprite("units_ships", "ship_a.png")
        .sprite("units_ships", "Ship_B.png")
        .sprite("units_ships", "Ship_C.png")
        .sprite("units_ships", "Ship_C_Thumbnail.png")
        .sprite("units_ships", "Ship_D.png")
        .sprite("units_ships", "notes.txt")
        .sprite("currency", "gold.png")
        .new_data_config(r#"{"excluded_items": ["SHIP_D"], "recorded_items": []}"#);

    let resolver = fx.layout.resolver();
    let folders = CatalogRepo::scan_new_data(&fx.layout, &resolver).await.unwrap();

    let ships = folders.iter().find(|f| f.folder == "units_ships").unwrap();
    let ids: Vec<_> = ships.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["Ship_C"]);
    assert_eq!(ships.items[0].folder_name, "战舰");
    assert!(ships.items[0]
        .image_path
        .ends_with("textures/sprites/units_ships/Ship_C.png"));

    // Currency is never scanned for new data.
    assert!(folders.iter().all(|f| f.folder != "currency"));
}

// ---------------------------------------------------------------------------
// Test: recording and excluding both remove an item from new data
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recording_and_excluding_remove_from_new_data() {
    let fx = Fixture::new();
    fx.sprite("flags", "Flag_1.png").sprite("flags", "Flag_2.png");
    let resolver = fx.layout.resolver();

    let before = CatalogRepo::scan_new_data(&fx.layout, &resolver).await.unwrap();
    assert_eq!(before[0].items.len(), 2);

    NewDataRepo::exclude(&fx.layout, "Flag_1").await.unwrap();
    let input = serde_json::from_value(serde_json::json!({
        "id": "flag_2",
        "name_cn": "旗",
        "name_en": "Flag",
        "type": "旗帜",
        "category": "旗帜",
        "added_date": "2025.10"
    }))
    .unwrap();
    NewDataRepo::record(&fx.layout, input).await.unwrap();

    let after = CatalogRepo::scan_new_data(&fx.layout, &resolver).await.unwrap();
    assert!(after[0].items.is_empty());

    let tree = CatalogRepo::scan_categories(&fx.layout, &resolver).await.unwrap();
    assert!(tree.get(NEW_DATA_LABEL).is_none());
    assert_eq!(tree[RECORDED_LABEL].name, "已录入数据 (1)");
}

// ---------------------------------------------------------------------------
// Test: CSV items resolve images by category and skip rows without id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn csv_items_resolve_images_with_lowercase_fallback() {
    let fx = Fixture::new();
    fx.csv("战舰.csv", SHIPS_CSV).sprite("units_ships", "ship_a.png");
    let resolver = fx.layout.resolver();

    let source = ItemSource::parse("战舰.csv").unwrap();
    let items = CatalogRepo::load_items(&fx.layout, &resolver, &source, "战舰")
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "Ship_A");
    assert!(items[0].has_image);
    assert!(items[0]
        .image_path
        .as_deref()
        .unwrap()
        .ends_with("units_ships/ship_a.png"));
    assert_eq!(items[0].data["name"], "甲");

    assert!(!items[1].has_image);
    assert_eq!(items[1].image_path, None);
}

#[tokio::test]
async fn missing_csv_yields_no_items() {
    let fx = Fixture::new();
    let resolver = fx.layout.resolver();
    let source = ItemSource::parse("不存在.csv").unwrap();

    let items = CatalogRepo::load_items(&fx.layout, &resolver, &source, "x")
        .await
        .unwrap();
    assert!(items.is_empty());
}

// ---------------------------------------------------------------------------
// Test: unreadable CSVs are skipped without failing the scan
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreadable_csv_is_skipped() {
    let fx = Fixture::new();
    fx.csv_bytes("坏.csv", b"id,name\nBroken,\xff\xfe\n")
        .sprite("weapons", "Broken.png");
    let resolver = fx.layout.resolver();

    let tree = CatalogRepo::scan_categories(&fx.layout, &resolver).await.unwrap();
    assert!(tree.contains_key("坏"));

    // Its ids are unknown, so the sprite shows up as new.
    let folders = CatalogRepo::scan_new_data(&fx.layout, &resolver).await.unwrap();
    let weapons = folders.iter().find(|f| f.folder == "weapons").unwrap();
    assert_eq!(weapons.items.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: new-data and recorded sources produce synthetic item data
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_data_source_items() {
    let fx = Fixture::new();
    fx.sprite("avataricons", "Avatar_9.png");
    let resolver = fx.layout.resolver();

    let source = ItemSource::parse("__new_data__avataricons").unwrap();
    let items = CatalogRepo::load_items(&fx.layout, &resolver, &source, "头像 (1)")
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert!(item.is_new && item.has_image);
    assert_eq!(item.data["name"], "Avatar_9");
    assert_eq!(item.data["folder_name"], "头像");
    assert_eq!(item.data["folder"], "avataricons");
}

#[tokio::test]
async fn recorded_source_items() {
    let fx = Fixture::new();
    fx.sprite("flags", "Flag_7.png").new_data_config(
        r#"{
          "excluded_items": [],
          "recorded_items": [
            {"id": "Flag_7", "name_cn": "七", "name_en": "Seven", "type": "旗帜",
             "category": "旗帜", "added_date": "2025.10", "folder": "flags", "rarity": "rare"},
            {"id": "Flag_8", "name_cn": "八", "name_en": "Eight", "type": "旗帜",
             "category": "旗帜", "added_date": "2025.9", "folder": "flags", "rarity": ""}
          ]
        }"#,
    );
    let resolver = fx.layout.resolver();

    let source = ItemSource::parse("__recorded_data__2025.10").unwrap();
    let items = CatalogRepo::load_items(&fx.layout, &resolver, &source, "2025.10 (1)")
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert!(item.is_recorded);
    assert!(item.has_image);
    assert_eq!(item.data["name"], "七");
    assert_eq!(item.data["typeString"], "旗帜");
    assert_eq!(item.data["rarityTypeString"], "rare");

    let tree = CatalogRepo::scan_categories(&fx.layout, &resolver).await.unwrap();
    let months: Vec<_> = tree[RECORDED_LABEL]
        .subcategories
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(months, vec!["2025.10 (1)", "2025.9 (1)"]);
}
