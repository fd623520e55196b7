use super::number::format_plain;
use super::{FormatError, Formatter, GroupLabel};
use crate::presentation::presenters::position_totals;
use csv::Writer;
use rust_decimal::Decimal;
use wealthgrabber_types::{Account, Activity, Position};

const ACCOUNT_HEADERS: [&str; 4] = ["description", "number", "value", "currency"];
const ACTIVITY_HEADERS: [&str; 7] = [
    "date",
    "activity_type",
    "description",
    "amount",
    "currency",
    "sign",
    "account_label",
];
const POSITION_HEADERS: [&str; 9] = [
    "symbol",
    "name",
    "quantity",
    "market_value",
    "book_value",
    "currency",
    "pnl",
    "pnl_pct",
    "account_label",
];

/// First column of a totals row
pub const TOTAL_LABEL: &str = "TOTAL";

/// Comma-separated values; headers match the JSON field names.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn format_accounts(&self, accounts: &[Account]) -> Result<String, FormatError> {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(ACCOUNT_HEADERS)?;
        for account in accounts {
            writer.write_record([
                account.description.as_str(),
                account.number.as_str(),
                format_plain(account.value).as_str(),
                account.currency.as_str(),
            ])?;
        }
        finish(writer)
    }

    fn format_activities(&self, activities: &[Activity]) -> Result<String, FormatError> {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(ACTIVITY_HEADERS)?;
        for activity in activities {
            writer.write_record([
                activity.date.as_str(),
                activity.activity_type.as_str(),
                activity.description.as_str(),
                format_plain(activity.amount).as_str(),
                activity.currency.as_str(),
                activity.sign.as_str(),
                activity.account_label.as_deref().unwrap_or_default(),
            ])?;
        }
        finish(writer)
    }

    fn format_positions(
        &self,
        positions: &[Position],
        show_totals: bool,
        _group_label: Option<GroupLabel>,
    ) -> Result<String, FormatError> {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(POSITION_HEADERS)?;
        for position in positions {
            writer.write_record([
                position.symbol.as_str(),
                position.name.as_str(),
                position.quantity.normalize().to_string().as_str(),
                format_plain(position.market_value).as_str(),
                format_plain(position.book_value).as_str(),
                position.currency.as_str(),
                format_plain(position.pnl).as_str(),
                format_ratio(position.pnl_pct).as_str(),
                position.account_label.as_deref().unwrap_or_default(),
            ])?;
        }

        if show_totals {
            for total in position_totals(positions) {
                writer.write_record([
                    TOTAL_LABEL,
                    "",
                    total.quantity.normalize().to_string().as_str(),
                    format_plain(total.market_value).as_str(),
                    format_plain(total.book_value).as_str(),
                    total.currency.as_str(),
                    format_plain(total.pnl).as_str(),
                    format_ratio(total.pnl_pct).as_str(),
                    "",
                ])?;
            }
        }
        finish(writer)
    }
}

fn format_ratio(ratio: Option<Decimal>) -> String {
    ratio
        .map(|r| r.normalize().to_string())
        .unwrap_or_default()
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String, FormatError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ::csv::Error::from(e.into_error()))?;
    let text = String::from_utf8(bytes)?;
    Ok(text.trim_end_matches('\n').to_string())
}
