//! New-data reconciliation.
//!
//! An extracted sprite is "new" when its file stem matches no catalog id
//! and no recorded id (case-insensitively) and the operator has not
//! excluded it. This module holds the pure set logic; directory listing is
//! done by the caller.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Sprite folders scanned for new data, with their display names.
///
/// `currency` and `titles` are deliberately absent.
pub const NEW_DATA_FOLDERS: &[(&str, &str)] = &[
    ("avataricons", "头像"),
    ("camouflages", "涂装"),
    ("flags", "旗帜"),
    ("units_ships", "战舰"),
    ("weapons", "武器"),
];

/// CSV files that never contribute catalog ids or categories.
pub const EXCLUDED_CSV_FILES: &[&str] = &["活动.csv", "战斗通行证.csv"];

/// Stem marker of thumbnail sprites, which are never new data.
pub const THUMBNAIL_MARKER: &str = "_Thumbnail";

/// A sprite with no catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub id: String,
    /// Sprite folder name (e.g. `units_ships`).
    pub folder: String,
    /// Display name of the folder (e.g. `战舰`).
    pub folder_name: String,
    /// `/`-separated path relative to the asset root.
    pub image_path: String,
}

/// New items of one sprite folder.
#[derive(Debug, Clone, Serialize)]
pub struct NewDataFolder {
    pub folder: String,
    pub friendly_name: String,
    pub items: Vec<NewItem>,
}

/// Case-insensitive id set.
#[derive(Debug, Clone, Default)]
pub struct IdSet(HashSet<String>);

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &str) {
        if !id.is_empty() {
            self.0.insert(id.to_lowercase());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(&id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for IdSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Display name of a scanned sprite folder.
pub fn friendly_folder_name(folder: &str) -> Option<&'static str> {
    NEW_DATA_FOLDERS
        .iter()
        .find(|(name, _)| *name == folder)
        .map(|(_, friendly)| *friendly)
}

/// Whether a CSV file name takes part in the catalog.
pub fn is_catalog_csv(file_name: &str) -> bool {
    file_name.ends_with(".csv") && !EXCLUDED_CSV_FILES.contains(&file_name)
}

/// Whether a sprite stem is a new item.
pub fn is_new_item(stem: &str, known: &IdSet, excluded: &IdSet) -> bool {
    !stem.is_empty()
        && !stem.contains(THUMBNAIL_MARKER)
        && !excluded.contains(stem)
        && !known.contains(stem)
}

/// Select the new items of one folder.
///
/// `sprites` yields `(stem, image_path)` pairs for the folder's PNG files.
/// The result is sorted by id.
pub fn find_new_items<I>(
    folder: &str,
    folder_name: &str,
    sprites: I,
    known: &IdSet,
    excluded: &IdSet,
) -> Vec<NewItem>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut items: Vec<NewItem> = sprites
        .into_iter()
        .filter(|(stem, _)| is_new_item(stem, known, excluded))
        .map(|(id, image_path)| NewItem {
            id,
            folder: folder.to_string(),
            folder_name: folder_name.to_string(),
            image_path,
        })
        .collect();
    items.sort_by(|a, b| a.id.cmp(&b.id));
    items
}
