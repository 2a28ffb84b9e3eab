//! Small async helpers around `tokio::fs` shared by the repositories.

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

/// Read a UTF-8 file, `None` when it does not exist.
pub(crate) async fn read_optional(path: &Path) -> StoreResult<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Read and deserialize a JSON file, `None` when it does not exist.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let Some(text) = read_optional(path).await? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| StoreError::json(path, e))
}

/// Read a JSON file that may be absent or broken; both degrade to the
/// default value with a warning.
pub(crate) async fn read_json_or_default<T>(path: &Path, what: &'static str) -> T
where
    T: DeserializeOwned + Default,
{
    match read_json(path).await {
        Ok(Some(value)) => value,
        Ok(None) => {
            tracing::warn!(path = %path.display(), what, "File not found, using empty value");
            T::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, what, "Failed to load file, using empty value");
            T::default()
        }
    }
}

/// Write pretty-printed JSON (two-space indent, non-ASCII kept as is),
/// creating parent directories as needed.
pub(crate) async fn write_json_pretty<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }
    let text = serde_json::to_string_pretty(value).map_err(|e| StoreError::json(path, e))?;
    tokio::fs::write(path, text)
        .await
        .map_err(|e| StoreError::io(path, e))
}
