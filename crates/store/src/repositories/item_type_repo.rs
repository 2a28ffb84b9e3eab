//! Repository for the read-only item type mapping.

use mwres_core::image_resolver::ImageResolver;

use crate::files::read_json_or_default;
use crate::models::item_type::{CommonItem, ItemTypeMapping};
use crate::DataLayout;

pub struct ItemTypeRepo;

impl ItemTypeRepo {
    /// Load the mapping file; missing or malformed reads as empty.
    pub async fn load(layout: &DataLayout) -> ItemTypeMapping {
        read_json_or_default(&layout.item_type_mapping_file, "item type mapping").await
    }

    /// Common items with their icons resolved by item type.
    pub async fn common_items(layout: &DataLayout, resolver: &ImageResolver) -> Vec<CommonItem> {
        Self::load(layout)
            .await
            .common_items
            .into_iter()
            .map(|mut item| {
                item.image_path = resolver.resolve(&item.id, &item.item_type, None).path;
                item
            })
            .collect()
    }
}
