//! New-data management config (`新数据管理.json`) and its request DTOs.

use mwres_core::error::CoreError;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Persisted structs
// ---------------------------------------------------------------------------

/// The whole config file. Loaded and saved wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDataConfig {
    /// Ids hidden from the new-data view.
    #[serde(default)]
    pub excluded_items: Vec<String>,
    /// Items promoted into the catalog.
    #[serde(default)]
    pub recorded_items: Vec<RecordedItem>,
}

/// A new-data item promoted into the catalog with operator metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordedItem {
    pub id: String,
    pub name_cn: String,
    pub name_en: String,
    #[serde(rename = "type")]
    pub item_type: String,
    /// Category used for image resolution.
    pub category: String,
    /// Free-text month label, usually `YYYY.MM`.
    pub added_date: String,
    pub folder: String,
    pub rarity: String,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /api/new-data-config/exclude`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExcludeItem {
    #[serde(default)]
    pub id: Option<String>,
}

/// Body of `POST /api/new-data-config/record`. Every field is optional on
/// the wire so that a missing field yields a validation error naming it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordNewItem {
    pub id: Option<String>,
    pub name_cn: Option<String>,
    pub name_en: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub category: Option<String>,
    pub added_date: Option<String>,
    pub folder: Option<String>,
    pub rarity: Option<String>,
}

impl RecordNewItem {
    /// Check the required fields in order and build the persisted item.
    pub fn into_recorded(self) -> Result<RecordedItem, CoreError> {
        fn required(value: Option<String>, field: &str) -> Result<String, CoreError> {
            match value {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(CoreError::Validation(format!(
                    "Missing required field: {field}"
                ))),
            }
        }

        Ok(RecordedItem {
            id: required(self.id, "id")?,
            name_cn: required(self.name_cn, "name_cn")?,
            name_en: required(self.name_en, "name_en")?,
            item_type: required(self.item_type, "type")?,
            category: required(self.category, "category")?,
            added_date: required(self.added_date, "added_date")?,
            folder: self.folder.unwrap_or_default(),
            rarity: self.rarity.unwrap_or_default(),
        })
    }
}
