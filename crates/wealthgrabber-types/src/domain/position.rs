use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal places kept for `pnl_pct`
const PNL_RATIO_DP: u32 = 6;

/// A holding in one security, with profit and loss against its book value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub name: String,
    pub quantity: Decimal,
    pub market_value: Decimal,
    pub book_value: Decimal,
    pub currency: String,
    /// `market_value - book_value`
    pub pnl: Decimal,
    /// `pnl / book_value` as a ratio (0.25 == 25%); absent when book value is zero
    pub pnl_pct: Option<Decimal>,
    pub account_label: Option<String>,
}

impl Position {
    /// Build a position, deriving `pnl` and `pnl_pct` from the two values.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        quantity: Decimal,
        market_value: Decimal,
        book_value: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        let pnl = market_value - book_value;
        Self {
            symbol: symbol.into(),
            name: name.into(),
            quantity,
            market_value,
            book_value,
            currency: currency.into(),
            pnl,
            pnl_pct: pnl_ratio(pnl, book_value),
            account_label: None,
        }
    }

    pub fn with_account_label(mut self, label: impl Into<String>) -> Self {
        self.account_label = Some(label.into());
        self
    }
}

/// `pnl / book_value`, or `None` when there is no cost basis to compare against.
pub fn pnl_ratio(pnl: Decimal, book_value: Decimal) -> Option<Decimal> {
    if book_value.is_zero() {
        return None;
    }
    pnl.checked_div(book_value)
        .map(|ratio| ratio.round_dp(PNL_RATIO_DP))
}
