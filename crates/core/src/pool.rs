//! Gacha pool items and the rules for building them from dragged catalog
//! entries.
//!
//! When the operator drags a catalog row into a pool, the item's type has to
//! be inferred from the category the row came from. The rules are specific
//! to the game's taxonomy, so they live in [`TypeInferenceRules`] (loadable
//! from JSON) rather than in code branches.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::UNKNOWN_LABEL;

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

pub const RARITY_LEGENDARY: &str = "legendary";
pub const RARITY_EPIC: &str = "epic";
pub const RARITY_RARE: &str = "rare";
pub const RARITY_COMMON: &str = "common";
pub const VALID_RARITIES: &[&str] = &[RARITY_LEGENDARY, RARITY_EPIC, RARITY_RARE, RARITY_COMMON];

/// Map a scraped rarity label (English or Chinese) to one of
/// [`VALID_RARITIES`]. Anything unrecognised is `common`.
pub fn normalize_rarity(raw: &str) -> &'static str {
    if let Some(known) = VALID_RARITIES.iter().find(|r| **r == raw) {
        return *known;
    }
    if raw.contains("传说") {
        RARITY_LEGENDARY
    } else if raw.contains("史诗") {
        RARITY_EPIC
    } else if raw.contains("稀有") {
        RARITY_RARE
    } else {
        RARITY_COMMON
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One entry of a gacha pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub rarity: String,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

/// An item being dragged into a pool: either a catalog row (with `data`) or
/// an existing pool item (with `type`, `rarity`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraggedItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl DraggedItem {
    /// Non-empty string value of a `data` field.
    fn data_str(&self, key: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .get(key)?
            .as_str()
            .filter(|s| !s.is_empty())
    }
}

/// Category → item type rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeInferenceRules {
    /// Type used when nothing can be inferred.
    pub unknown_type: String,
    /// Separator between main and sub category in the UI's category label.
    pub category_separator: String,
    /// Categories containing this marker hold recorded items, which carry
    /// their own `typeString`.
    pub recorded_marker: String,
    /// Main category of new data; the type is the sprite folder's display name.
    pub new_data_category: String,
    /// Main categories whose subcategory name is the item type.
    pub passthrough_categories: Vec<String>,
    /// Main categories mapped straight to a type.
    pub direct_categories: IndexMap<String, String>,
}

impl Default for TypeInferenceRules {
    fn default() -> Self {
        Self {
            unknown_type: UNKNOWN_LABEL.to_string(),
            category_separator: " - ".to_string(),
            recorded_marker: "已录入数据".to_string(),
            new_data_category: "新数据".to_string(),
            passthrough_categories: vec!["武器".into(), "航空器".into(), "裝飾品".into()],
            direct_categories: IndexMap::from([
                ("战舰".to_string(), "战舰".to_string()),
                ("无人舰艇".to_string(), "无人舰艇".to_string()),
            ]),
        }
    }
}

impl TypeInferenceRules {
    /// Parse rules from JSON; omitted fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        serde_json::from_str(text)
            .map_err(|e| CoreError::Validation(format!("Invalid type inference rules: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// Infer the pool type of a dragged item from the category it was dragged
/// from (`"main"` or `"main - sub"`).
pub fn infer_item_type(
    rules: &TypeInferenceRules,
    item: &DraggedItem,
    current_category: Option<&str>,
) -> String {
    if let Some(existing) = item
        .item_type
        .as_deref()
        .filter(|t| !t.is_empty() && *t != rules.unknown_type)
    {
        return existing.to_string();
    }

    let Some(category) = current_category.filter(|c| !c.is_empty()) else {
        return rules.unknown_type.clone();
    };

    if category.contains(&rules.recorded_marker) {
        return item
            .data_str("typeString")
            .map(str::to_string)
            .unwrap_or_else(|| rules.unknown_type.clone());
    }

    let mut parts = category.split(rules.category_separator.as_str());
    let main = parts.next().unwrap_or_default();
    let sub = parts.next().filter(|s| !s.is_empty());

    if rules.passthrough_categories.iter().any(|c| c == main) {
        return sub
            .or_else(|| item.data_str("typeString"))
            .unwrap_or(main)
            .to_string();
    }

    if let Some(mapped) = rules.direct_categories.get(main) {
        return mapped.clone();
    }

    if main == rules.new_data_category {
        return item
            .data_str("folder_name")
            .map(str::to_string)
            .unwrap_or_else(|| rules.unknown_type.clone());
    }

    main.to_string()
}

/// Build the pool entry for a dragged item.
///
/// Fails with [`CoreError::Duplicate`] when the id is among `existing_ids`,
/// the ids already in the target pool.
pub fn build_pool_item(
    rules: &TypeInferenceRules,
    item: &DraggedItem,
    current_category: Option<&str>,
    existing_ids: &[&str],
) -> Result<PoolItem, CoreError> {
    if item.id.is_empty() {
        return Err(CoreError::Validation("Dragged item has no id".into()));
    }
    if existing_ids.contains(&item.id.as_str()) {
        return Err(CoreError::Duplicate(format!(
            "Item {} is already in this pool",
            item.id
        )));
    }

    let (name, rarity) = if item.data.is_some() {
        let name = item
            .data_str("name")
            .or_else(|| item.data_str("name_en"))
            .unwrap_or(item.id.as_str());
        let rarity = normalize_rarity(item.data_str("rarityTypeString").unwrap_or(RARITY_COMMON));
        (name.to_string(), rarity.to_string())
    } else {
        let name = item.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(item.id.as_str());
        let rarity = item
            .rarity
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(RARITY_COMMON);
        (name.to_string(), rarity.to_string())
    };

    Ok(PoolItem {
        id: item.id.clone(),
        name,
        item_type: infer_item_type(rules, item, current_category),
        rarity,
        probability: item.probability.unwrap_or(0.0),
        limit: item.limit.unwrap_or(0),
        image_path: item.image_path.clone(),
    })
}
