pub mod activity;
pub mod catalog;
pub mod common_items;
pub mod new_data;
pub mod ui;
