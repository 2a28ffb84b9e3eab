//! File-backed repositories for the curation tool.
//!
//! There is no database: the CSV tree, the sprite tree, the activity
//! documents and two JSON side files are the persistent state. Every
//! repository is a zero-sized struct whose async methods take the
//! [`DataLayout`] describing where those files live.

use std::path::{Path, PathBuf};

use mwres_core::activity::ActivityKind;
use mwres_core::image_resolver::ImageResolver;
use serde::Serialize;

pub mod error;
mod files;
pub mod models;
pub mod repositories;

pub use error::{StoreError, StoreResult};

/// CSV catalog tree, relative to the base directory.
pub const DEFAULT_DATA_DIR: &str = "MW数据站爬虫/爬取数据";
/// Extracted sprite folders, relative to the base directory.
pub const DEFAULT_IMAGE_DIR: &str = "MW解包有益资源/contentseparated_assets_content/textures/sprites";
/// Icons of currencies and props that live outside the sprite tree.
pub const DEFAULT_COMMON_ITEMS_DIR: &str = "MW解包有益资源/common-items";
/// Activity documents, one sub-directory per activity kind.
pub const DEFAULT_ACTIVITY_DIR: &str = "MW数据站爬虫/抽奖物品数据";
pub const DEFAULT_NEW_DATA_CONFIG: &str = "新数据管理.json";
pub const DEFAULT_ITEM_TYPE_MAPPING: &str = "物品类型映射.json";

/// Locations of every file tree the tool reads or writes.
#[derive(Debug, Clone)]
pub struct DataLayout {
    /// Asset root; image paths in responses are relative to it.
    pub base_dir: PathBuf,
    pub data_dir: PathBuf,
    pub image_dir: PathBuf,
    pub common_items_dir: PathBuf,
    pub activity_dir: PathBuf,
    pub new_data_config_file: PathBuf,
    pub item_type_mapping_file: PathBuf,
}

impl DataLayout {
    /// The conventional layout under `base_dir`.
    pub fn from_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            data_dir: base_dir.join(DEFAULT_DATA_DIR),
            image_dir: base_dir.join(DEFAULT_IMAGE_DIR),
            common_items_dir: base_dir.join(DEFAULT_COMMON_ITEMS_DIR),
            activity_dir: base_dir.join(DEFAULT_ACTIVITY_DIR),
            new_data_config_file: base_dir.join(DEFAULT_NEW_DATA_CONFIG),
            item_type_mapping_file: base_dir.join(DEFAULT_ITEM_TYPE_MAPPING),
            base_dir,
        }
    }

    /// Image resolver over this layout's sprite folders.
    pub fn resolver(&self) -> ImageResolver {
        ImageResolver::new(&self.base_dir, &self.image_dir, &self.common_items_dir)
    }

    /// Directory holding the documents of one activity kind.
    pub fn activity_kind_dir(&self, kind: ActivityKind) -> PathBuf {
        self.activity_dir.join(kind.as_str())
    }
}

/// Presence of the input trees, reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutHealth {
    pub data_dir_present: bool,
    pub image_dir_present: bool,
    pub activity_dir_present: bool,
}

impl LayoutHealth {
    /// The catalog is usable when both the CSV and sprite trees exist.
    pub fn is_healthy(&self) -> bool {
        self.data_dir_present && self.image_dir_present
    }
}

/// Check which of the configured directories exist.
pub async fn health_check(layout: &DataLayout) -> LayoutHealth {
    LayoutHealth {
        data_dir_present: is_dir(&layout.data_dir).await,
        image_dir_present: is_dir(&layout.image_dir).await,
        activity_dir_present: is_dir(&layout.activity_dir).await,
    }
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// `/`-separated rendering of a relative path.
pub(crate) fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
