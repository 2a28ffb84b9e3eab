//! Recorded-item month grouping.
//!
//! Recorded items carry a free-text month label (the UI suggests
//! `YYYY.MM`). Groups are ordered newest first by a regex-parsed
//! `(year, month)` key, with unparsable labels last.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::UNKNOWN_LABEL;

static YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})(?:\D+(\d{1,2}))?").expect("valid month regex"));

/// Sort key for a month label: `(year, month)`, `(0, 0)` when unparsable.
pub fn month_sort_key(label: &str) -> (u32, u32) {
    let Some(caps) = YEAR_MONTH.captures(label) else {
        return (0, 0);
    };
    let year = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let month = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    (year, month)
}

/// Compare two month labels so that newer months come first.
pub fn newest_first(a: &str, b: &str) -> Ordering {
    month_sort_key(b)
        .cmp(&month_sort_key(a))
        .then_with(|| b.cmp(a))
}

/// Label used to group an item; missing or blank labels become `未知`.
pub fn month_label(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => UNKNOWN_LABEL.to_string(),
    }
}

/// Group items by month label, newest month first. Items keep their
/// relative order within a group.
pub fn group_by_month<T, F>(items: impl IntoIterator<Item = T>, month_of: F) -> Vec<(String, Vec<T>)>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut groups: Vec<(String, Vec<T>)> = Vec::new();

    for item in items {
        let label = month_label(month_of(&item));
        match groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((label, vec![item])),
        }
    }

    groups.sort_by(|(a, _), (b, _)| newest_first(a, b));
    groups
}
