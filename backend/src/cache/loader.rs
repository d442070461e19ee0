//! Dish cache file loading with encoding and delimiter auto-detection.
//!
//! Accepts a delimited export of the `food_ingredients` table (columns
//! `dish_name` and `ingredients`, any header case) or a JSON array of
//! `{ "dish_name", "ingredients" }` objects.

use serde::Deserialize;
use std::path::Path;

use crate::error::{StoreError, StoreResult};

/// One row of the dish table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DishRow {
    pub dish_name: String,
    pub ingredients: String,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Detect the delimiter by counting occurrences in the header line.
///
/// Ingredient cells are full of `,` and `;`, so only the header is trusted.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse delimited dish rows. Quoted cells may contain the delimiter.
pub fn parse_delimited(content: &str, delimiter: char) -> StoreResult<Vec<DishRow>> {
    if content.trim().is_empty() {
        return Err(StoreError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| StoreError::MissingColumn(name.to_string()))
    };
    let name_col = column("dish_name")?;
    let ingredients_col = column("ingredients")?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let dish_name = record.get(name_col).unwrap_or("").trim();
        if dish_name.is_empty() {
            continue;
        }
        rows.push(DishRow {
            dish_name: dish_name.to_string(),
            ingredients: record.get(ingredients_col).unwrap_or("").to_string(),
        });
    }

    Ok(rows)
}

/// Parse delimited bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> StoreResult<Vec<DishRow>> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    parse_delimited(&content, delimiter)
}

/// Load dish rows from a file, picking the format from its extension.
pub fn load_rows(path: &Path) -> StoreResult<Vec<DishRow>> {
    let bytes = std::fs::read(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => {
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Err(StoreError::EmptyFile);
            }
            Ok(serde_json::from_slice(&bytes)?)
        }
        "csv" | "tsv" | "txt" => parse_bytes_auto(&bytes),
        other => Err(StoreError::UnsupportedFormat(other.to_string())),
    }
}
