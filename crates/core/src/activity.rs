//! Activity (gacha) documents.
//!
//! Three document shapes exist, selected by the activity kind:
//!
//! - chip: `{id, gacha_type, metadata, items: [PoolItem]}`
//! - flagship: `{..., lootboxes: [{type, metadata, items: [PoolItem]}]}`
//! - cargo: `{..., cargos: [{type, metadata, items: [PoolItem]}]}`
//!
//! Documents stay `serde_json::Value`s so unknown fields survive a
//! load/save cycle untouched. `image_path` on pool items is derived data:
//! injected on read, stripped before write.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::CoreError;
use crate::image_resolver::ImageResolver;

/// Field holding the derived image path on pool items.
pub const IMAGE_PATH_FIELD: &str = "image_path";

/// The three activity document layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    /// Single pool.
    Chip,
    /// Container and flagship lootboxes.
    Flagship,
    /// Two parallel cargo pools.
    Cargo,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 3] = [Self::Chip, Self::Flagship, Self::Cargo];

    /// Directory name under the activity root, also the URL segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chip => "chip",
            Self::Flagship => "flagship",
            Self::Cargo => "cargo",
        }
    }

    /// Key of the pool list for dual-pool kinds.
    pub fn pools_key(&self) -> Option<&'static str> {
        match self {
            Self::Chip => None,
            Self::Flagship => Some("lootboxes"),
            Self::Cargo => Some("cargos"),
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown activity type '{s}'. Must be one of: chip, flagship, cargo"
                ))
            })
    }
}

/// Activity ids become file names, so they must be a single plain path
/// segment.
pub fn validate_activity_id(id: &str) -> Result<(), CoreError> {
    let invalid = id.trim().is_empty()
        || id.contains(['/', '\\'])
        || id == "."
        || id.contains("..");
    if invalid {
        return Err(CoreError::Validation(format!("Invalid activity id '{id}'")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Visit every pool item object of a document. Missing or malformed pool
/// lists are skipped silently.
pub fn for_each_pool_item_mut<F>(kind: ActivityKind, doc: &mut Value, mut visit: F)
where
    F: FnMut(&mut serde_json::Map<String, Value>),
{
    let mut visit_items = |items: Option<&mut Value>| {
        if let Some(Value::Array(items)) = items {
            for item in items.iter_mut() {
                if let Value::Object(obj) = item {
                    visit(obj);
                }
            }
        }
    };

    match kind.pools_key() {
        None => visit_items(doc.get_mut("items")),
        Some(key) => {
            if let Some(Value::Array(pools)) = doc.get_mut(key) {
                for pool in pools.iter_mut() {
                    visit_items(pool.get_mut("items"));
                }
            }
        }
    }
}

/// Count pool items in a document.
pub fn count_pool_items(kind: ActivityKind, doc: &mut Value) -> usize {
    let mut count = 0;
    for_each_pool_item_mut(kind, doc, |_| count += 1);
    count
}

/// Set `image_path` on every pool item from its `id`, `type` and the
/// activity id. Items without a resolvable image lose any stale
/// `image_path`. Returns the number of items that received a path.
pub fn inject_image_paths(
    kind: ActivityKind,
    doc: &mut Value,
    activity_id: &str,
    resolver: &ImageResolver,
) -> usize {
    let mut resolved = 0;
    for_each_pool_item_mut(kind, doc, |item| {
        let id = item.get("id").and_then(Value::as_str).unwrap_or_default();
        let item_type = item.get("type").and_then(Value::as_str).unwrap_or_default();

        match resolver.resolve(id, item_type, Some(activity_id)).path {
            Some(path) => {
                item.insert(IMAGE_PATH_FIELD.to_string(), Value::String(path));
                resolved += 1;
            }
            None => {
                item.remove(IMAGE_PATH_FIELD);
            }
        }
    });
    resolved
}

/// Remove `image_path` from every pool item.
pub fn strip_image_paths(kind: ActivityKind, doc: &mut Value) {
    for_each_pool_item_mut(kind, doc, |item| {
        item.remove(IMAGE_PATH_FIELD);
    });
}
