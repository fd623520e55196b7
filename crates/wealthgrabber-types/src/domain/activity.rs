use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const CREDIT_SIGN: &str = "+";
pub const DEBIT_SIGN: &str = "-";

/// A single account activity (trade, deposit, dividend, fee...).
///
/// `amount` is always a magnitude; `sign` carries the direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Occurrence date, `YYYY-MM-DD`
    pub date: String,
    pub activity_type: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub sign: String,
    /// `"<description> (<number>)"` when activities of several accounts are listed together
    pub account_label: Option<String>,
}
