//! Serde models of the JSON side files.

pub mod item_type;
pub mod new_data;
