//! Catalog CSV tables.
//!
//! The scrapers write UTF-8 with a byte-order mark and a header row. Rows
//! are returned as ordered header → value maps.

use crate::types::CsvRow;

/// A parsed CSV table.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    /// Non-empty values of the `id` column, in row order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(|row| row.get("id"))
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

/// Parse CSV text into a [`CsvTable`].
///
/// Short rows are padded with empty strings; values beyond the header
/// width are dropped. Blank lines are skipped.
pub fn parse_csv(text: &str) -> Result<CsvTable, String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err("CSV is empty".into());
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        let row: CsvRow = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), record.get(i).unwrap_or_default().to_string()))
            .collect();
        rows.push(row);
    }

    Ok(CsvTable { headers, rows })
}
