//! Assertions over rendered JSON and CSV.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

/// Assert that `json` is an array of `expected` elements.
pub fn assert_array_len(json: &Value, expected: usize) -> Result<()> {
    let items = json.as_array().context("Expected a JSON array")?;
    if items.len() != expected {
        anyhow::bail!("Expected {} items, got {}", expected, items.len());
    }
    Ok(())
}

/// Assert that a JSON object has exactly the given keys (order ignored).
pub fn assert_object_keys(json: &Value, expected: &[&str]) -> Result<()> {
    let object = json.as_object().context("Expected a JSON object")?;
    let mut actual: Vec<&str> = object.keys().map(String::as_str).collect();
    let mut wanted = expected.to_vec();
    actual.sort_unstable();
    wanted.sort_unstable();
    if actual != wanted {
        anyhow::bail!("Expected keys {:?}, got {:?}", wanted, actual);
    }
    Ok(())
}

/// Parse CSV text into one map per data row, keyed by header.
pub fn csv_rows(text: &str) -> Result<Vec<HashMap<String, String>>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("CSV row {} is malformed", i))?;
        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect(),
        );
    }
    Ok(rows)
}

/// Header names of CSV text.
pub fn csv_headers(text: &str) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    Ok(reader.headers()?.iter().map(str::to_string).collect())
}

/// Assert that a rendered amount is within one cent of `expected`.
pub fn assert_money_close(actual: &str, expected: Decimal) -> Result<()> {
    let parsed = Decimal::from_str(actual.trim())
        .with_context(|| format!("'{}' is not a decimal amount", actual))?;
    if (parsed - expected).abs() > Decimal::new(1, 2) {
        anyhow::bail!("Expected {} (within 0.01), got {}", expected, parsed);
    }
    Ok(())
}

/// Decimal value of a JSON number.
pub fn json_decimal(value: &Value) -> Result<Decimal> {
    let Value::Number(number) = value else {
        anyhow::bail!("Expected a JSON number, got {}", value);
    };
    Decimal::from_str(&number.to_string())
        .or_else(|_| Decimal::from_scientific(&number.to_string()))
        .with_context(|| format!("{} is not representable as a decimal", number))
}
