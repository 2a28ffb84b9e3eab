//! Repository for the new-data management config.
//!
//! Every mutation loads the whole file, modifies it and writes it back.
//! There is no locking; concurrent writers race and the last one wins.
//! Reads degrade to an empty config, but mutations refuse to overwrite a
//! file that does not parse.

use indexmap::IndexMap;
use mwres_core::error::CoreError;
use mwres_core::recorded::{group_by_month, month_label};

use crate::files::{read_json, read_json_or_default, write_json_pretty};
use crate::models::new_data::{NewDataConfig, RecordNewItem, RecordedItem};
use crate::{DataLayout, StoreResult};

/// Provides load/save and mutations of `新数据管理.json`.
pub struct NewDataRepo;

impl NewDataRepo {
    /// Load the config. A missing or malformed file reads as empty.
    pub async fn load(layout: &DataLayout) -> NewDataConfig {
        read_json_or_default(&layout.new_data_config_file, "new data config").await
    }

    /// Load the config before a mutation. A missing file is empty; a
    /// malformed one is an error so the write does not discard it.
    async fn load_for_update(layout: &DataLayout) -> StoreResult<NewDataConfig> {
        Ok(read_json(&layout.new_data_config_file)
            .await?
            .unwrap_or_default())
    }

    /// Overwrite the config file.
    pub async fn save(layout: &DataLayout, config: &NewDataConfig) -> StoreResult<()> {
        write_json_pretty(&layout.new_data_config_file, config).await
    }

    /// Add `id` to the excluded list. Returns `false` when it was already
    /// excluded (the file is left untouched).
    pub async fn exclude(layout: &DataLayout, id: &str) -> StoreResult<bool> {
        if id.is_empty() {
            return Err(CoreError::Validation("Missing id".into()).into());
        }

        let mut config = Self::load_for_update(layout).await?;
        if config.excluded_items.iter().any(|e| e == id) {
            return Ok(false);
        }
        config.excluded_items.push(id.to_string());
        Self::save(layout, &config).await?;
        Ok(true)
    }

    /// Remove `id` from the excluded list. Returns `false` when it was not
    /// excluded.
    pub async fn unexclude(layout: &DataLayout, id: &str) -> StoreResult<bool> {
        let mut config = Self::load_for_update(layout).await?;
        let before = config.excluded_items.len();
        config.excluded_items.retain(|e| e != id);
        if config.excluded_items.len() == before {
            return Ok(false);
        }
        Self::save(layout, &config).await?;
        Ok(true)
    }

    /// Validate and append a recorded item.
    pub async fn record(layout: &DataLayout, input: RecordNewItem) -> StoreResult<RecordedItem> {
        let item = input.into_recorded()?;

        let mut config = Self::load_for_update(layout).await?;
        if config.recorded_items.iter().any(|r| r.id == item.id) {
            return Err(CoreError::Duplicate(format!(
                "Item '{}' has already been recorded",
                item.id
            ))
            .into());
        }

        config.recorded_items.push(item.clone());
        Self::save(layout, &config).await?;
        Ok(item)
    }

    pub async fn recorded(layout: &DataLayout) -> Vec<RecordedItem> {
        Self::load(layout).await.recorded_items
    }

    /// Recorded items whose month label equals `month`. Items without a
    /// month match `未知`.
    pub async fn recorded_in_month(layout: &DataLayout, month: &str) -> Vec<RecordedItem> {
        Self::recorded(layout)
            .await
            .into_iter()
            .filter(|item| month_label(Some(item.added_date.as_str())) == month)
            .collect()
    }

    /// All recorded items grouped by month label, newest month first.
    pub async fn recorded_by_month(layout: &DataLayout) -> IndexMap<String, Vec<RecordedItem>> {
        let items = Self::recorded(layout).await;
        group_by_month(items, |item| Some(item.added_date.as_str()))
            .into_iter()
            .collect()
    }
}
