//! Repository for activity documents (`<activity_dir>/<kind>/<id>.json`).

use std::io::ErrorKind;

use mwres_core::activity::{strip_image_paths, validate_activity_id, ActivityKind};
use mwres_core::error::CoreError;
use serde_json::Value;

use crate::error::StoreError;
use crate::files::{read_optional, write_json_pretty};
use crate::{DataLayout, StoreResult};

/// Provides list/load/save for activity documents.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Sorted ids of the documents of one kind. A missing kind directory
    /// lists nothing.
    pub async fn list(layout: &DataLayout, kind: ActivityKind) -> StoreResult<Vec<String>> {
        let dir = layout.activity_kind_dir(kind);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(dir, e)),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&dir, e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem() {
                    ids.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Load a document as stored, without derived image paths.
    pub async fn load(layout: &DataLayout, kind: ActivityKind, id: &str) -> StoreResult<Value> {
        validate_activity_id(id)?;
        let path = layout.activity_kind_dir(kind).join(format!("{id}.json"));

        let text = read_optional(&path).await?.ok_or_else(|| CoreError::NotFound {
            entity: "Activity",
            id: format!("{kind}/{id}"),
        })?;

        serde_json::from_str(&text).map_err(|e| StoreError::json(path, e))
    }

    /// Strip derived image paths and write the document, creating the kind
    /// directory when needed.
    pub async fn save(
        layout: &DataLayout,
        kind: ActivityKind,
        id: &str,
        mut document: Value,
    ) -> StoreResult<()> {
        validate_activity_id(id)?;
        if !document.is_object() {
            return Err(
                CoreError::Validation("Activity document must be a JSON object".into()).into(),
            );
        }

        strip_image_paths(kind, &mut document);

        let path = layout.activity_kind_dir(kind).join(format!("{id}.json"));
        write_json_pretty(&path, &document).await?;

        tracing::info!(kind = %kind, activity_id = %id, "Activity saved");
        Ok(())
    }
}
