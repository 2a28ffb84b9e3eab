//! Domain logic for the resource curation tool.
//!
//! Everything here is independent of HTTP and of the on-disk layout; the
//! only filesystem access is the PNG existence probing done by
//! [`image_resolver::ImageResolver`].

pub mod activity;
pub mod catalog;
pub mod csv_table;
pub mod error;
pub mod image_resolver;
pub mod pool;
pub mod reconcile;
pub mod recorded;
pub mod types;
