/// Item ids are the asset names used by the game (e.g. `Example_Ship`).
pub type ItemId = String;

/// A raw CSV row keyed by header, in column order.
pub type CsvRow = indexmap::IndexMap<String, String>;

/// Marker used wherever a type or month label is unknown.
pub const UNKNOWN_LABEL: &str = "未知";
