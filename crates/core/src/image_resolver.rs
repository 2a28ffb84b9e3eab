//! Item image lookup.
//!
//! Maps a category or item type to one or more sprite folders and probes
//! them for `{id}.png` (plus a lowercase variant). Per-activity currency
//! icons use a `{id}_{activity_id}.png` naming convention that is tried
//! first. A miss is a normal outcome that drives the "missing image" badge,
//! never an error.

use std::path::{Path, PathBuf};

use serde::Serialize;

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Category (or item type) → sprite folder under the image directory.
///
/// Order matters: the substring fallback picks the first matching entry.
pub const CATEGORY_IMAGE_FOLDERS: &[(&str, &str)] = &[
    ("战舰", "units_ships"),
    ("无人舰艇", "units_ships"),
    ("武器", "weapons"),
    ("主炮", "weapons"),
    ("导弹", "weapons"),
    ("火箭炮", "weapons"),
    ("自卫炮", "weapons"),
    ("防空设备", "weapons"),
    ("鱼雷发射器", "weapons"),
    ("鱼雷", "weapons"),
    ("航空器", "weapons"),
    ("战斗机", "weapons"),
    ("攻击机", "weapons"),
    ("无人机", "weapons"),
    ("直升机", "weapons"),
    ("轰炸机", "weapons"),
    ("头像", "avataricons"),
    ("旗帜", "flags"),
    ("头衔", "titles"),
    ("涂装", "camouflages"),
    ("皮肤", "camouflages"),
    ("资源", "currency"),
    ("道具", "currency"),
];

/// Item types whose icons may live in either the currency sprites or the
/// hand-collected common-items folder.
pub const CURRENCY_TYPES: &[&str] = &["资源", "道具"];

/// Currency folder name under the image directory.
pub const CURRENCY_FOLDER: &str = "currency";

/// Currencies whose icon differs per activity (`{id}_{activity_id}.png`).
pub const ACTIVITY_CURRENCY_IDS: &[&str] = &[
    "bigevent_currency_gacha_gameplay",
    "bigevent_currency_gacha_rm",
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Outcome of an image lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageLookup {
    /// `/`-separated path relative to the asset root.
    pub path: Option<String>,
    pub found: bool,
}

impl ImageLookup {
    fn missing() -> Self {
        Self {
            path: None,
            found: false,
        }
    }

    fn hit(path: String) -> Self {
        Self {
            path: Some(path),
            found: true,
        }
    }
}

/// Resolves item images against the extracted sprite tree.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_dir: PathBuf,
    image_dir: PathBuf,
    common_items_dir: PathBuf,
}

impl ImageResolver {
    /// `base_dir` is the asset root that returned paths are relative to;
    /// `image_dir` holds the per-category sprite folders.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        image_dir: impl Into<PathBuf>,
        common_items_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            image_dir: image_dir.into(),
            common_items_dir: common_items_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Candidate folders for a category or item type, in probe order.
    pub fn candidate_folders(&self, category_or_type: &str) -> Vec<PathBuf> {
        if category_or_type.is_empty() {
            return Vec::new();
        }

        if CURRENCY_TYPES.contains(&category_or_type) {
            return vec![
                self.image_dir.join(CURRENCY_FOLDER),
                self.common_items_dir.clone(),
            ];
        }

        folder_for_category(category_or_type)
            .map(|folder| vec![self.image_dir.join(folder)])
            .unwrap_or_default()
    }

    /// Look up the image for `item_id` under the folders mapped from
    /// `category_or_type`. `activity_id` enables the per-activity currency
    /// naming convention.
    pub fn resolve(
        &self,
        item_id: &str,
        category_or_type: &str,
        activity_id: Option<&str>,
    ) -> ImageLookup {
        if item_id.is_empty() {
            return ImageLookup::missing();
        }

        for dir in self.candidate_folders(category_or_type) {
            if !dir.is_dir() {
                continue;
            }

            for file_name in candidate_file_names(item_id, activity_id) {
                let candidate = dir.join(&file_name);
                if !candidate.is_file() {
                    continue;
                }
                match self.relative_to_base(&candidate) {
                    Some(rel) => return ImageLookup::hit(rel),
                    None => {
                        tracing::warn!(
                            path = %candidate.display(),
                            base = %self.base_dir.display(),
                            "Image found outside the asset root, ignoring",
                        );
                    }
                }
            }
        }

        ImageLookup::missing()
    }

    /// Convert an absolute (or base-joined) path into a `/`-separated path
    /// relative to the asset root.
    pub fn relative_to_base(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.base_dir).ok()?;
        let parts: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(parts.join("/"))
    }
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Map a category label to its sprite folder.
///
/// Exact keys win; otherwise the first table entry whose key contains, or is
/// contained in, the label.
pub fn folder_for_category(category: &str) -> Option<&'static str> {
    if category.is_empty() {
        return None;
    }

    CATEGORY_IMAGE_FOLDERS
        .iter()
        .find(|(key, _)| *key == category)
        .or_else(|| {
            CATEGORY_IMAGE_FOLDERS
                .iter()
                .find(|(key, _)| category.contains(key) || key.contains(category))
        })
        .map(|(_, folder)| *folder)
}

/// File names to probe, in order.
pub fn candidate_file_names(item_id: &str, activity_id: Option<&str>) -> Vec<String> {
    let mut names = Vec::with_capacity(3);

    if let Some(activity) = activity_id.filter(|a| !a.is_empty()) {
        if ACTIVITY_CURRENCY_IDS.contains(&item_id) {
            names.push(format!("{item_id}_{activity}.png"));
        }
    }

    names.push(format!("{item_id}.png"));

    let lower = item_id.to_lowercase();
    if lower != item_id {
        names.push(format!("{lower}.png"));
    }

    names
}
