//! Repository for the CSV catalog and the sprite tree.
//!
//! Nothing is cached: every call rescans the directories so that files
//! dropped in by the scrapers and extractors show up on the next request.

use std::path::{Path, PathBuf};

use mwres_core::catalog::{
    add_new_data_category, add_recorded_category, build_csv_categories, CatalogItem,
    CategoryTree, CsvFileEntry, ItemSource,
};
use mwres_core::csv_table::{parse_csv, CsvTable};
use mwres_core::error::CoreError;
use mwres_core::image_resolver::ImageResolver;
use mwres_core::reconcile::{
    find_new_items, is_catalog_csv, IdSet, NewDataFolder, NEW_DATA_FOLDERS,
};
use mwres_core::recorded::{group_by_month, month_label};
use mwres_core::types::CsvRow;
use walkdir::WalkDir;

use crate::files::read_optional;
use crate::models::new_data::{NewDataConfig, RecordedItem};
use crate::repositories::NewDataRepo;
use crate::{slash_path, DataLayout, StoreResult};

/// Scans the catalog and builds category trees and item lists.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Every catalog CSV under the data directory, in walk order (sorted by
    /// file name at each level).
    pub async fn list_csv_files(layout: &DataLayout) -> StoreResult<Vec<CsvFileEntry>> {
        let data_dir = layout.data_dir.clone();
        let files = tokio::task::spawn_blocking(move || walk_csv_files(&data_dir))
            .await
            .map_err(|e| CoreError::Internal(format!("CSV scan task failed: {e}")))?;
        Ok(files)
    }

    /// Read and parse one CSV. Unreadable or malformed files yield `None`.
    pub async fn read_table(path: &Path) -> Option<CsvTable> {
        let text = match read_optional(path).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::warn!(path = %path.display(), "CSV file not found");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read CSV file");
                return None;
            }
        };

        match parse_csv(&text) {
            Ok(table) => Some(table),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping malformed CSV");
                None
            }
        }
    }

    /// Lowercased ids of every catalog CSV plus every recorded item.
    pub async fn known_ids(
        layout: &DataLayout,
        files: &[CsvFileEntry],
        config: &NewDataConfig,
    ) -> IdSet {
        let mut known = IdSet::new();
        for file in files {
            if let Some(table) = Self::read_table(&layout.data_dir.join(&file.rel_path)).await {
                for id in table.ids() {
                    known.insert(id);
                }
            }
        }
        for item in &config.recorded_items {
            if !item.id.is_empty() {
                known.insert(&item.id);
            }
        }
        known
    }

    /// Sprites that no CSV row, recorded item or exclusion accounts for,
    /// grouped by asset folder.
    pub async fn scan_new_data(
        layout: &DataLayout,
        resolver: &ImageResolver,
    ) -> StoreResult<Vec<NewDataFolder>> {
        let files = Self::list_csv_files(layout).await?;
        let config = NewDataRepo::load(layout).await;
        Self::scan_new_data_with(layout, resolver, &files, &config).await
    }

    async fn scan_new_data_with(
        layout: &DataLayout,
        resolver: &ImageResolver,
        files: &[CsvFileEntry],
        config: &NewDataConfig,
    ) -> StoreResult<Vec<NewDataFolder>> {
        let known = Self::known_ids(layout, files, config).await;
        let excluded: IdSet = config.excluded_items.iter().map(String::as_str).collect();

        let image_dir = layout.image_dir.clone();
        let resolver = resolver.clone();
        let sprites = tokio::task::spawn_blocking(move || list_sprite_folders(&image_dir, &resolver))
            .await
            .map_err(|e| CoreError::Internal(format!("Sprite scan task failed: {e}")))?;

        let folders: Vec<NewDataFolder> = sprites
            .into_iter()
            .map(|(folder, friendly_name, pngs)| NewDataFolder {
                items: find_new_items(folder, friendly_name, pngs, &known, &excluded),
                folder: folder.to_string(),
                friendly_name: friendly_name.to_string(),
            })
            .collect();

        let total: usize = folders.iter().map(|f| f.items.len()).sum();
        tracing::debug!(known = known.len(), excluded = excluded.len(), new = total, "Scanned new data");
        Ok(folders)
    }

    /// The full category tree: CSV categories, then new data, then
    /// recorded data.
    pub async fn scan_categories(
        layout: &DataLayout,
        resolver: &ImageResolver,
    ) -> StoreResult<CategoryTree> {
        let files = Self::list_csv_files(layout).await?;
        let config = NewDataRepo::load(layout).await;

        let mut tree = build_csv_categories(&files);

        let new_data = Self::scan_new_data_with(layout, resolver, &files, &config).await?;
        add_new_data_category(&mut tree, &new_data);

        let months: Vec<(String, usize)> =
            group_by_month(&config.recorded_items, |item| Some(item.added_date.as_str()))
                .into_iter()
                .map(|(month, items)| (month, items.len()))
                .collect();
        add_recorded_category(&mut tree, &months);

        Ok(tree)
    }

    /// Items of a clicked category. `category` is the clicked label and
    /// drives image resolution for CSV sources.
    pub async fn load_items(
        layout: &DataLayout,
        resolver: &ImageResolver,
        source: &ItemSource,
        category: &str,
    ) -> StoreResult<Vec<CatalogItem>> {
        match source {
            ItemSource::Csv(rel_path) => {
                let path = layout.data_dir.join(rel_path);
                let Some(table) = Self::read_table(&path).await else {
                    return Ok(Vec::new());
                };
                Ok(csv_items(table, resolver, category))
            }
            ItemSource::NewData(folder) => {
                let folders = Self::scan_new_data(layout, resolver).await?;
                let items = folders
                    .into_iter()
                    .find(|f| &f.folder == folder)
                    .map(|f| f.items)
                    .unwrap_or_default();

                Ok(items
                    .into_iter()
                    .map(|item| {
                        let data = CsvRow::from([
                            ("name".to_string(), item.id.clone()),
                            ("name_en".to_string(), item.id.clone()),
                            ("folder_name".to_string(), item.folder_name),
                            ("folder".to_string(), item.folder),
                        ]);
                        CatalogItem {
                            id: item.id,
                            data,
                            image_path: Some(item.image_path),
                            has_image: true,
                            is_new: true,
                            is_recorded: false,
                        }
                    })
                    .collect())
            }
            ItemSource::Recorded(month) => {
                let items = NewDataRepo::recorded_in_month(layout, month).await;
                Ok(items
                    .into_iter()
                    .map(|item| recorded_item(item, resolver))
                    .collect())
            }
        }
    }
}

fn csv_items(table: CsvTable, resolver: &ImageResolver, category: &str) -> Vec<CatalogItem> {
    table
        .rows
        .into_iter()
        .filter_map(|row| {
            let id = row.get("id").filter(|id| !id.is_empty())?.clone();
            let lookup = resolver.resolve(&id, category, None);
            Some(CatalogItem {
                id,
                data: row,
                image_path: lookup.path,
                has_image: lookup.found,
                is_new: false,
                is_recorded: false,
            })
        })
        .collect()
}

fn recorded_item(item: RecordedItem, resolver: &ImageResolver) -> CatalogItem {
    let lookup = resolver.resolve(&item.id, &item.category, None);
    let or_id = |value: &str| {
        if value.is_empty() {
            item.id.clone()
        } else {
            value.to_string()
        }
    };

    let data = CsvRow::from([
        ("name".to_string(), or_id(&item.name_cn)),
        ("name_en".to_string(), or_id(&item.name_en)),
        ("typeString".to_string(), item.item_type.clone()),
        ("added_date".to_string(), month_label(Some(item.added_date.as_str()))),
        ("rarityTypeString".to_string(), item.rarity.clone()),
    ]);

    CatalogItem {
        id: item.id.clone(),
        data,
        image_path: lookup.path,
        has_image: lookup.found,
        is_new: false,
        is_recorded: true,
    }
}

// ---------------------------------------------------------------------------
// Blocking walkers
// ---------------------------------------------------------------------------

fn walk_csv_files(data_dir: &Path) -> Vec<CsvFileEntry> {
    if !data_dir.is_dir() {
        tracing::warn!(path = %data_dir.display(), "Data directory not found");
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(data_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable catalog entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !is_catalog_csv(&file_name) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(data_dir) else {
            continue;
        };

        files.push(CsvFileEntry {
            rel_dir: rel.parent().map(slash_path).unwrap_or_default(),
            stem: file_name.trim_end_matches(".csv").to_string(),
            rel_path: slash_path(rel),
        });
    }
    files
}

type SpriteFolder = (&'static str, &'static str, Vec<(String, String)>);

/// PNG stems and base-relative paths of each scanned asset folder. Folders
/// that do not exist are skipped.
fn list_sprite_folders(image_dir: &Path, resolver: &ImageResolver) -> Vec<SpriteFolder> {
    NEW_DATA_FOLDERS
        .iter()
        .filter_map(|&(folder, friendly_name)| {
            let dir: PathBuf = image_dir.join(folder);
            if !dir.is_dir() {
                return None;
            }
            Some((folder, friendly_name, list_pngs(&dir, resolver)))
        })
        .collect()
}

fn list_pngs(dir: &Path, resolver: &ImageResolver) -> Vec<(String, String)> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "png"))
        .filter_map(|e| {
            let stem = e.path().file_stem()?.to_string_lossy().into_owned();
            let image_path = resolver.relative_to_base(e.path())?;
            Some((stem, image_path))
        })
        .collect()
}
