//! Output formatters.
//!
//! A [`Formatter`] turns one record kind into a complete output string.
//! Formatters are stateless and looked up by name with [`get_formatter`].

mod csv;
mod json;
pub mod number;
mod table;
pub mod text;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::table::TableFormatter;
pub use crate::presentation::presenters::GroupLabel;

use thiserror::Error;
use wealthgrabber_types::{Account, Activity, Position};

pub trait Formatter: Send + Sync {
    fn name(&self) -> &'static str;

    fn format_accounts(&self, accounts: &[Account]) -> Result<String, FormatError>;

    fn format_activities(&self, activities: &[Activity]) -> Result<String, FormatError>;

    /// `show_totals` appends per-currency totals; `group_label` partitions the
    /// output by that attribute where the format supports it.
    fn format_positions(
        &self,
        positions: &[Position],
        show_totals: bool,
        group_label: Option<GroupLabel>,
    ) -> Result<String, FormatError>;
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported format '{format}'. Valid formats: {}", format_names().join(", "))]
pub struct UnsupportedFormatError {
    pub format: String,
}

static FORMATTERS: &[(&str, &dyn Formatter)] = &[
    ("table", &TableFormatter),
    ("json", &JsonFormatter),
    ("csv", &CsvFormatter),
];

/// Formatter registered under `format_type`. Names are matched exactly.
pub fn get_formatter(format_type: &str) -> Result<&'static dyn Formatter, UnsupportedFormatError> {
    FORMATTERS
        .iter()
        .find(|(name, _)| *name == format_type)
        .map(|(_, formatter)| *formatter)
        .ok_or_else(|| UnsupportedFormatError {
            format: format_type.to_string(),
        })
}

pub fn format_names() -> Vec<&'static str> {
    FORMATTERS.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter_by_name() {
        for name in ["table", "json", "csv"] {
            assert_eq!(get_formatter(name).unwrap().name(), name);
        }
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let err = get_formatter("JSON").err().unwrap();
        assert_eq!(err.format, "JSON");
        assert_eq!(
            err.to_string(),
            "Unsupported format 'JSON'. Valid formats: table, json, csv"
        );
    }

    #[test]
    fn test_unknown_format() {
        assert!(get_formatter("xml").is_err());
        assert!(get_formatter("").is_err());
    }
}
