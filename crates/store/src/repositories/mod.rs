//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&DataLayout` as the first argument.

pub mod activity_repo;
pub mod catalog_repo;
pub mod item_type_repo;
pub mod new_data_repo;

pub use activity_repo::ActivityRepo;
pub use catalog_repo::CatalogRepo;
pub use item_type_repo::ItemTypeRepo;
pub use new_data_repo::NewDataRepo;
