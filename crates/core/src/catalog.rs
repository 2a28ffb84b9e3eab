//! Category tree and catalog item types.
//!
//! Categories mirror the CSV tree 1:1 (root files become top-level
//! categories, files in sub-directories become subcategories of the
//! directory). Two synthetic categories are appended: new data grouped by
//! sprite folder, and recorded data grouped by month.

use std::path::{Component, Path};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::CoreError;
use crate::reconcile::NewDataFolder;
use crate::types::CsvRow;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Path prefix of new-data subcategories (`__new_data__<folder>`).
pub const NEW_DATA_PREFIX: &str = "__new_data__";

/// Path prefix of recorded-data subcategories (`__recorded_data__<month>`).
pub const RECORDED_PREFIX: &str = "__recorded_data__";

pub const NEW_DATA_LABEL: &str = "新数据";
pub const RECORDED_LABEL: &str = "已录入数据";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A top-level category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode {
    pub name: String,
    /// CSV path relative to the data directory, `None` for grouping nodes.
    pub path: Option<String>,
    pub subcategories: Vec<SubCategory>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_new_data: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_recorded_data: bool,
}

impl CategoryNode {
    fn grouping(name: String) -> Self {
        Self {
            name,
            path: None,
            subcategories: Vec::new(),
            is_new_data: false,
            is_recorded_data: false,
        }
    }
}

/// A subcategory entry under a top-level category.
#[derive(Debug, Clone, Serialize)]
pub struct SubCategory {
    pub name: String,
    pub path: String,
    pub parent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

/// Category tree keyed by label, in display order.
pub type CategoryTree = IndexMap<String, CategoryNode>;

/// A catalog CSV discovered under the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFileEntry {
    /// `/`-separated directory relative to the data directory; empty for root files.
    pub rel_dir: String,
    /// File name without `.csv`.
    pub stem: String,
    /// `/`-separated file path relative to the data directory.
    pub rel_path: String,
}

/// Where the items of a clicked category come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSource {
    /// A CSV file relative to the data directory.
    Csv(String),
    /// New data of one sprite folder.
    NewData(String),
    /// Recorded items of one month.
    Recorded(String),
}

impl ItemSource {
    /// Parse the `path` value of a category or subcategory.
    pub fn parse(path: &str) -> Result<Self, CoreError> {
        if let Some(folder) = path.strip_prefix(NEW_DATA_PREFIX) {
            return Ok(Self::NewData(folder.to_string()));
        }
        if let Some(month) = path.strip_prefix(RECORDED_PREFIX) {
            return Ok(Self::Recorded(month.to_string()));
        }
        validate_relative_csv_path(path)?;
        Ok(Self::Csv(path.to_string()))
    }
}

/// An item row returned to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    pub id: String,
    pub data: CsvRow,
    pub image_path: Option<String>,
    pub has_image: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_new: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_recorded: bool,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A CSV path must be relative, stay inside the data directory, and name a
/// `.csv` file.
pub fn validate_relative_csv_path(path: &str) -> Result<(), CoreError> {
    if path.trim().is_empty() {
        return Err(CoreError::Validation("csv_path is required".into()));
    }
    if !path.ends_with(".csv") {
        return Err(CoreError::Validation(format!(
            "csv_path must name a .csv file: {path}"
        )));
    }
    let escapes = Path::new(path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(CoreError::Validation(format!(
            "csv_path must stay inside the data directory: {path}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tree building
// ---------------------------------------------------------------------------

/// Build the CSV part of the category tree, preserving the input order.
pub fn build_csv_categories(files: &[CsvFileEntry]) -> CategoryTree {
    let mut tree = CategoryTree::new();

    for file in files {
        if file.rel_dir.is_empty() {
            tree.entry(file.stem.clone()).or_insert_with(|| CategoryNode {
                path: Some(file.rel_path.clone()),
                ..CategoryNode::grouping(file.stem.clone())
            });
        } else {
            tree.entry(file.rel_dir.clone())
                .or_insert_with(|| CategoryNode::grouping(file.rel_dir.clone()))
                .subcategories
                .push(SubCategory {
                    name: file.stem.clone(),
                    path: file.rel_path.clone(),
                    parent: file.rel_dir.clone(),
                    folder: None,
                    month: None,
                });
        }
    }

    tree
}

/// Append the synthetic new-data category; no-op when nothing is new.
pub fn add_new_data_category(tree: &mut CategoryTree, folders: &[NewDataFolder]) {
    let total: usize = folders.iter().map(|f| f.items.len()).sum();
    if total == 0 {
        return;
    }

    let subcategories = folders
        .iter()
        .filter(|f| !f.items.is_empty())
        .map(|f| SubCategory {
            name: format!("{} ({})", f.friendly_name, f.items.len()),
            path: format!("{NEW_DATA_PREFIX}{}", f.folder),
            parent: NEW_DATA_LABEL.to_string(),
            folder: Some(f.folder.clone()),
            month: None,
        })
        .collect();

    tree.insert(
        NEW_DATA_LABEL.to_string(),
        CategoryNode {
            subcategories,
            is_new_data: true,
            ..CategoryNode::grouping(format!("{NEW_DATA_LABEL} ({total})"))
        },
    );
}

/// Append the synthetic recorded-data category from `(month, count)` groups
/// already ordered newest first; no-op when nothing is recorded.
pub fn add_recorded_category(tree: &mut CategoryTree, months: &[(String, usize)]) {
    let total: usize = months.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return;
    }

    let subcategories = months
        .iter()
        .map(|(month, count)| SubCategory {
            name: format!("{month} ({count})"),
            path: format!("{RECORDED_PREFIX}{month}"),
            parent: RECORDED_LABEL.to_string(),
            folder: None,
            month: Some(month.clone()),
        })
        .collect();

    tree.insert(
        RECORDED_LABEL.to_string(),
        CategoryNode {
            subcategories,
            is_recorded_data: true,
            ..CategoryNode::grouping(format!("{RECORDED_LABEL} ({total})"))
        },
    );
}
