use super::{FormatError, Formatter, GroupLabel};
use crate::presentation::presenters::{CurrencyTotals, position_totals};
use serde::Serialize;
use wealthgrabber_types::{Account, Activity, Position};

/// Pretty-printed JSON arrays, field names as in the records.
pub struct JsonFormatter;

#[derive(Serialize)]
struct WithTotals<'a> {
    items: &'a [Position],
    totals: Vec<CurrencyTotals>,
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn format_accounts(&self, accounts: &[Account]) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(accounts)?)
    }

    fn format_activities(&self, activities: &[Activity]) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(activities)?)
    }

    fn format_positions(
        &self,
        positions: &[Position],
        show_totals: bool,
        _group_label: Option<GroupLabel>,
    ) -> Result<String, FormatError> {
        if !show_totals {
            return Ok(serde_json::to_string_pretty(positions)?);
        }
        let body = WithTotals {
            items: positions,
            totals: position_totals(positions),
        };
        Ok(serde_json::to_string_pretty(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wealthgrabber_testing::fixtures::sample_positions;

    #[test]
    fn test_totals_change_the_shape() {
        let out = JsonFormatter
            .format_positions(&sample_positions(), true, None)
            .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["items"].as_array().unwrap().len(), 3);
        assert_eq!(value["totals"][0]["currency"], "CAD");
        assert_eq!(value["totals"][0]["pnl"], serde_json::json!(400.0));
        assert_eq!(value["totals"][1]["currency"], "USD");
    }

    #[test]
    fn test_empty_with_totals() {
        let out = JsonFormatter.format_positions(&[], true, None).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!({ "items": [], "totals": [] }));
    }

    #[test]
    fn test_empty_without_totals_is_an_empty_array() {
        assert_eq!(JsonFormatter.format_accounts(&[]).unwrap(), "[]");
        assert_eq!(JsonFormatter.format_activities(&[]).unwrap(), "[]");
        assert_eq!(JsonFormatter.format_positions(&[], false, None).unwrap(), "[]");
    }
}
