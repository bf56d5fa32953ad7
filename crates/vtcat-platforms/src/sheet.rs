//! Spreadsheet feed reader.
//!
//! The feed is a JSON array of rows, each row an array of cells in column
//! order. Cells are usually strings, but spreadsheet exports also produce
//! numbers and nulls.

use reqwest::Client;
use serde_json::Value;

use vtcat_core::CreatorRow;

use crate::error::PlatformError;
use crate::http::{parse_json, send_for_bytes};

/// Fetches and decodes every creator row from the feed, in feed order.
///
/// # Errors
///
/// Returns [`PlatformError`] on network failure, a non-2xx status, or a body
/// that is not an array of arrays.
pub async fn fetch_rows(client: &Client, url: &str) -> Result<Vec<CreatorRow>, PlatformError> {
    let body = send_for_bytes(client.get(url)).await?;
    parse_rows(&body)
}

/// Decodes a feed body. Rows with a blank name are skipped.
///
/// # Errors
///
/// Returns [`PlatformError::Deserialize`] if `body` is not an array of arrays.
pub fn parse_rows(body: &[u8]) -> Result<Vec<CreatorRow>, PlatformError> {
    let raw: Vec<Vec<Value>> = parse_json(body, "spreadsheet feed")?;
    let rows = raw
        .iter()
        .enumerate()
        .filter_map(|(idx, cells)| {
            let texts: Vec<String> = cells.iter().map(cell_text).collect();
            let row = CreatorRow::from_cells(&texts);
            if row.name.trim().is_empty() {
                tracing::warn!(row = idx, "skipping feed row without a name");
                None
            } else {
                Some(row)
            }
        })
        .collect();
    Ok(rows)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}
