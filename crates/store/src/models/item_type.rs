//! Item type mapping (`物品类型映射.json`). Read-only.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The mapping file. Only `common_items` is consumed; other top-level keys
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemTypeMapping {
    #[serde(default)]
    pub common_items: Vec<CommonItem>,
}

/// A currency or prop that can be dropped into any pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Any further keys, passed through to the UI.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
