use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One brokerage account and its current net liquidation value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub description: String,
    /// Account number as shown by the broker; `--account` filters match it exactly
    pub number: String,
    pub value: Decimal,
    pub currency: String,
}
