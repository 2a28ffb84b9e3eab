//! Directory fixtures for repository tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use mwres_store::DataLayout;
use tempfile::TempDir;

/// A temporary asset root with the conventional layout.
pub struct Fixture {
    pub dir: TempDir,
    pub layout: DataLayout,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::from_base_dir(dir.path());
        fs::create_dir_all(&layout.data_dir).unwrap();
        fs::create_dir_all(&layout.image_dir).unwrap();
        Self { dir, layout }
    }

    /// Write a CSV under the data directory.
    pub fn csv(&self, rel_path: &str, content: &str) -> &Self {
        write(&self.layout.data_dir.join(rel_path), content.as_bytes());
        self
    }

    pub fn csv_bytes(&self, rel_path: &str, content: &[u8]) -> &Self {
        write(&self.layout.data_dir.join(rel_path), content);
        self
    }

    /// Write an empty PNG into a sprite folder.
    pub fn sprite(&self, folder: &str, file_name: &str) -> &Self {
        write(&self.layout.image_dir.join(folder).join(file_name), b"png");
        self
    }

    pub fn common_item_icon(&self, file_name: &str) -> &Self {
        write(&self.layout.common_items_dir.join(file_name), b"png");
        self
    }

    pub fn new_data_config(&self, json: &str) -> &Self {
        write(&self.layout.new_data_config_file, json.as_bytes());
        self
    }

    pub fn item_type_mapping(&self, json: &str) -> &Self {
        write(&self.layout.item_type_mapping_file, json.as_bytes());
        self
    }

    pub fn activity(&self, kind: &str, id: &str, json: &str) -> &Self {
        write(
            &self.layout.activity_dir.join(kind).join(format!("{id}.json")),
            json.as_bytes(),
        );
        self
    }
}

fn write(path: &Path, bytes: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}
